//! # API REST
//!
//! REST API implementation for the diet menu engine.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation served at `/api-docs/openapi.json`
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for request/response types and `diet-core` for all parsing.

#![warn(rust_2018_idioms)]

use api_shared::{
    CaloriesRes, DishDto, HealthRes, HealthService, MealDishesReq, MealDishesRes, MealRenderReq,
    MealRenderRes, MenuPromptReq, MenuPromptRes, MenuTextReq, MenuViewReq, MenuViewRes,
    ProfileDto, RecentMenuDto, SectionsRes, TargetCaloriesRes, WeightEntryDto, WeightStatsDto,
    WeightSummaryReq, WeightSummaryRes,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use diet_core::{
    dishes::recent_dish_names,
    nutrition::{target_calories, UserProfile},
    prompt::{build_menu_prompt, RecentMenu},
    weight::{parse_timestamp, summarize, WeightEntry},
    CalorieEstimate, DietError, DietResult, DishEntry, Meal, MealEditor, MealSections,
    MenuService, ParserConfig,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

/// Application state for the REST API server
///
/// Holds the menu service bound to the parser configuration resolved at startup.
#[derive(Clone)]
pub struct AppState {
    menu_service: MenuService,
}

impl AppState {
    pub fn new(cfg: Arc<ParserConfig>) -> Self {
        Self {
            menu_service: MenuService::new(cfg),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        menu_view,
        menu_sections,
        menu_calories,
        meal_dishes,
        meal_render,
        nutrition_target,
        menu_prompt,
        weight_summary,
    ),
    components(schemas(
        HealthRes,
        MenuTextReq,
        MenuViewReq,
        MenuViewRes,
        SectionsRes,
        CaloriesRes,
        DishDto,
        MealDishesReq,
        MealDishesRes,
        MealRenderReq,
        MealRenderRes,
        ProfileDto,
        TargetCaloriesRes,
        RecentMenuDto,
        MenuPromptReq,
        MenuPromptRes,
        WeightEntryDto,
        WeightSummaryReq,
        WeightStatsDto,
        WeightSummaryRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/menu/view", post(menu_view))
        .route("/menu/sections", post(menu_sections))
        .route("/menu/calories", post(menu_calories))
        .route("/menu/prompt", post(menu_prompt))
        .route("/meal/dishes", post(meal_dishes))
        .route("/meal/render", post(meal_render))
        .route("/nutrition/target", post(nutrition_target))
        .route("/weight/summary", post(weight_summary))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, String);

fn bad_request(err: DietError) -> ApiError {
    tracing::warn!("Rejected request: {}", err);
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn parse_date(input: &str) -> DietResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| DietError::InvalidTimestamp(input.to_owned()))
}

fn sections_res(sections: MealSections) -> SectionsRes {
    SectionsRes {
        breakfast: sections.breakfast,
        lunch: sections.lunch,
        dinner: sections.dinner,
    }
}

fn dish_dto(dish: &DishEntry) -> DishDto {
    DishDto {
        name: dish.name().to_owned(),
        portion: dish.portion().to_owned(),
        calories: dish.calories(),
    }
}

fn user_profile(dto: ProfileDto) -> UserProfile {
    UserProfile {
        gender: dto.gender,
        age: dto.age,
        height_cm: dto.height_cm,
        weight_kg: dto.weight_kg,
        activity_level: dto.activity_level,
        dietary_goal: dto.dietary_goal,
        allergies: dto.allergies,
    }
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/menu/view",
    request_body = MenuViewReq,
    responses(
        (status = 200, description = "Display-ready menu", body = MenuViewRes)
    )
)]
/// Builds the dashboard view of a stored menu
///
/// Empty meals carry the placeholder text. A positive `stored_calories` is shown as is;
/// otherwise the total is extracted from the text.
#[axum::debug_handler]
async fn menu_view(
    State(state): State<AppState>,
    Json(req): Json<MenuViewReq>,
) -> Json<MenuViewRes> {
    let view = state.menu_service.view(&req.content, req.stored_calories);
    Json(MenuViewRes {
        sections: sections_res(view.sections),
        calories: view.calories,
        calories_display: view.calories_display,
        calorie_source: view.calorie_source.as_str().to_owned(),
    })
}

#[utoipa::path(
    post,
    path = "/menu/sections",
    request_body = MenuTextReq,
    responses(
        (status = 200, description = "Per-meal markup fragments", body = SectionsRes)
    )
)]
#[axum::debug_handler]
async fn menu_sections(
    State(state): State<AppState>,
    Json(req): Json<MenuTextReq>,
) -> Json<SectionsRes> {
    Json(sections_res(state.menu_service.sections(&req.content)))
}

#[utoipa::path(
    post,
    path = "/menu/calories",
    request_body = MenuTextReq,
    responses(
        (status = 200, description = "Estimated daily calories", body = CaloriesRes)
    )
)]
#[axum::debug_handler]
async fn menu_calories(
    State(state): State<AppState>,
    Json(req): Json<MenuTextReq>,
) -> Json<CaloriesRes> {
    let found = state.menu_service.calories_with_tier(&req.content);
    let estimate = CalorieEstimate::from(found);
    let unknown = &state.menu_service.config().display().unknown_calories;

    Json(CaloriesRes {
        calories: estimate.kcal(),
        display: estimate.display_with(unknown),
        tier: found.map(|m| m.tier.as_str().to_owned()),
    })
}

#[utoipa::path(
    post,
    path = "/meal/dishes",
    request_body = MealDishesReq,
    responses(
        (status = 200, description = "Dish rows of the meal", body = MealDishesRes),
        (status = 400, description = "Unknown meal")
    )
)]
/// Opens a meal fragment for editing
///
/// Lines that do not look like `- Name (portion) - N kcal` are skipped.
#[axum::debug_handler]
async fn meal_dishes(
    State(_state): State<AppState>,
    Json(req): Json<MealDishesReq>,
) -> Result<Json<MealDishesRes>, ApiError> {
    let meal: Meal = req.meal.parse().map_err(bad_request)?;
    let editor = MealEditor::open(meal, &req.fragment);

    Ok(Json(MealDishesRes {
        meal: meal.to_string(),
        dishes: editor.dishes().iter().map(dish_dto).collect(),
        total_calories: editor.total_calories(),
    }))
}

#[utoipa::path(
    post,
    path = "/meal/render",
    request_body = MealRenderReq,
    responses(
        (status = 200, description = "Rendered meal content", body = MealRenderRes),
        (status = 400, description = "Invalid dish or empty meal")
    )
)]
/// Renders edited dish rows back into meal content
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the meal name is unknown,
/// - a dish has an empty name or portion, or a portion containing parentheses,
/// - no dishes are given.
#[axum::debug_handler]
async fn meal_render(
    State(_state): State<AppState>,
    Json(req): Json<MealRenderReq>,
) -> Result<Json<MealRenderRes>, ApiError> {
    let meal: Meal = req.meal.parse().map_err(bad_request)?;
    let dishes = req
        .dishes
        .into_iter()
        .map(|d| DishEntry::new(&d.name, &d.portion, d.calories))
        .collect::<DietResult<Vec<_>>>()
        .map_err(bad_request)?;

    let submission = MealEditor::with_dishes(meal, dishes)
        .submit()
        .map_err(bad_request)?;

    Ok(Json(MealRenderRes {
        meal: submission.meal.to_string(),
        content: submission.content,
        total_calories: submission.total_calories,
    }))
}

#[utoipa::path(
    post,
    path = "/nutrition/target",
    request_body = ProfileDto,
    responses(
        (status = 200, description = "Recommended daily calories", body = TargetCaloriesRes),
        (status = 400, description = "Profile is missing gender, age, height or weight")
    )
)]
#[axum::debug_handler]
async fn nutrition_target(
    State(_state): State<AppState>,
    Json(req): Json<ProfileDto>,
) -> Result<Json<TargetCaloriesRes>, ApiError> {
    let target = target_calories(&user_profile(req)).ok_or_else(|| {
        bad_request(DietError::InvalidInput(
            "profile needs gender, age, height and weight".into(),
        ))
    })?;

    Ok(Json(TargetCaloriesRes {
        kcal: target.kcal,
        goal: target.goal.as_str().to_owned(),
        goal_description: target.goal.description().to_owned(),
        bmr: target.bmr,
        tdee: target.tdee,
    }))
}

#[utoipa::path(
    post,
    path = "/menu/prompt",
    request_body = MenuPromptReq,
    responses(
        (status = 200, description = "Menu generation request text", body = MenuPromptRes),
        (status = 400, description = "Invalid date")
    )
)]
/// Builds the text sent to the menu generator
///
/// Dish names from `recent_menus` are listed as dishes to avoid.
#[axum::debug_handler]
async fn menu_prompt(
    State(_state): State<AppState>,
    Json(req): Json<MenuPromptReq>,
) -> Result<Json<MenuPromptRes>, ApiError> {
    let date = parse_date(&req.date).map_err(bad_request)?;
    let recent = req
        .recent_menus
        .iter()
        .map(|menu| {
            Ok(RecentMenu {
                date: parse_date(&menu.date)?,
                dishes: recent_dish_names(&menu.content),
            })
        })
        .collect::<DietResult<Vec<_>>>()
        .map_err(bad_request)?;

    let prompt = build_menu_prompt(&user_profile(req.profile), date, req.day_number, &recent);
    Ok(Json(MenuPromptRes { prompt }))
}

#[utoipa::path(
    post,
    path = "/weight/summary",
    request_body = WeightSummaryReq,
    responses(
        (status = 200, description = "Weight card figures", body = WeightSummaryRes),
        (status = 400, description = "Invalid timestamp or weight")
    )
)]
#[axum::debug_handler]
async fn weight_summary(
    State(_state): State<AppState>,
    Json(req): Json<WeightSummaryReq>,
) -> Result<Json<WeightSummaryRes>, ApiError> {
    let history = req
        .entries
        .iter()
        .map(|e| WeightEntry::parse(&e.recorded_at, e.weight_kg))
        .collect::<DietResult<Vec<_>>>()
        .map_err(bad_request)?;
    let now = match req.now.as_deref() {
        Some(now) => parse_timestamp(now).map_err(bad_request)?,
        None => Utc::now(),
    };

    let summary = summarize(&history, req.height_cm, req.profile_weight_kg, now);
    Ok(Json(WeightSummaryRes {
        current_weight_kg: summary.current_weight_kg,
        bmi: summary.bmi,
        change_kg: summary.change_kg,
        recorded_at: summary.recorded_at.map(|ts| ts.to_rfc3339()),
        stats: summary.stats.map(|s| WeightStatsDto {
            min_kg: s.min_kg,
            avg_kg: s.avg_kg,
            max_kg: s.max_kg,
        }),
    }))
}
