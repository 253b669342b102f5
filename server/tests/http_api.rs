use actix_web::{
    dev::ServiceResponse,
    http::StatusCode,
    test::{self, TestRequest},
    web, App,
};
use puckdeck_server::{
    cache::{default_catalogue, Catalogue},
    db::Store,
    http::{self, auth::PLAYER_HEADER},
};
use serde_json::{json, Value};
use uuid::Uuid;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Catalogue::from_file(default_catalogue())))
                .app_data(web::Data::new(Store::new()))
                .configure(http::routes::init_routes),
        )
        .await
    };
}

fn as_player(req: TestRequest, player: Uuid) -> TestRequest {
    req.insert_header((PLAYER_HEADER, player.to_string()))
}

async fn body(resp: ServiceResponse) -> Value {
    test::read_body_json(resp).await
}

#[actix_rt::test]
async fn healthz_is_ok() {
    let app = app!();
    let resp = test::call_service(&app, TestRequest::get().uri("/api/healthz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn requests_without_player_are_unauthorized() {
    let app = app!();
    let resp = test::call_service(&app, TestRequest::get().uri("/api/cards/mine").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::get()
        .uri("/api/cards/mine")
        .insert_header((PLAYER_HEADER, "not-a-uuid"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn starter_pack_flow() {
    let app = app!();
    let me = Uuid::new_v4();

    let req = as_player(TestRequest::get().uri("/api/cards/starter-pack-status"), me).to_request();
    let status = body(test::call_service(&app, req).await).await;
    assert_eq!(status["available"], json!(true));

    let req = as_player(TestRequest::post().uri("/api/cards/starter-pack"), me).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body(resp).await["cards"].as_array().map(Vec::len), Some(6));

    let req = as_player(TestRequest::post().uri("/api/cards/starter-pack"), me).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body(resp).await["error"], json!("starter_pack_claimed"));

    let req = as_player(TestRequest::get().uri("/api/cards/mine"), me).to_request();
    let mine = body(test::call_service(&app, req).await).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 6);
    assert!(mine[0]["modified_stats"]["current_ovr"].is_i64());
    assert!(mine[0]["tier"].is_string());
}

macro_rules! claim_pack {
    ($app:expr, $me:expr) => {{
        let req = as_player(TestRequest::post().uri("/api/cards/starter-pack"), $me).to_request();
        let resp = test::call_service(&$app, req).await;
        body(resp).await["cards"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }};
}

fn id_of(cards: &[Value], position: &str, nth: usize) -> Value {
    cards
        .iter()
        .filter(|c| c["position"] == json!(position))
        .nth(nth)
        .map(|c| c["user_card_id"].clone())
        .unwrap()
}

#[actix_rt::test]
async fn roster_errors_map_to_statuses() {
    let app = app!();
    let me = Uuid::new_v4();
    let cards = claim_pack!(app, me);
    let fwd = id_of(&cards, "Forward", 0);
    let goalie = id_of(&cards, "Goaltender", 0);

    let save = |roster: Value| {
        as_player(TestRequest::post().uri("/api/team/roster"), me)
            .set_json(json!({ "roster": roster }))
            .to_request()
    };

    let resp = test::call_service(&app, save(json!({ "LW": fwd, "C": fwd }))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body(resp).await["error"], json!("duplicate_assignment"));

    let resp = test::call_service(&app, save(json!({ "C": goalie }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(resp).await["error"], json!("role_mismatch"));

    let resp = test::call_service(&app, save(json!({ "C": Uuid::new_v4() }))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, save(json!({ "C": fwd, "G": goalie }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let view = body(resp).await;
    assert_eq!(view["team_chemistry_points"], json!(2));
    assert_eq!(view["roster"]["C"], fwd);
    assert_eq!(view["roster"]["LW"], Value::Null);
}

#[actix_rt::test]
async fn place_and_battle_stats() {
    let app = app!();
    let me = Uuid::new_v4();
    let cards = claim_pack!(app, me);

    let req = as_player(TestRequest::post().uri("/api/team/battle-stats"), me)
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let fwd = id_of(&cards, "Forward", 0);
    let req = as_player(TestRequest::post().uri("/api/team/roster/place"), me)
        .set_json(json!({ "user_card_id": fwd, "field_position": "RW" }))
        .to_request();
    let placed = body(test::call_service(&app, req).await).await;
    assert_eq!(placed["roster"]["RW"], fwd);
    assert_eq!(placed["team_chemistry_points"], json!(1));

    let req = as_player(TestRequest::post().uri("/api/team/battle-stats"), me)
        .set_json(json!({ "impact_card_ids": [1] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let team = body(resp).await;
    assert_eq!(team["team"].as_array().map(Vec::len), Some(1));
    assert_eq!(team["team"][0]["field_position"], json!("RW"));

    let req = as_player(TestRequest::post().uri("/api/team/finish-match"), me)
        .set_json(json!({ "participating_card_ids": [fwd] }))
        .to_request();
    let done = body(test::call_service(&app, req).await).await;
    assert_eq!(done["updated_cards"], json!(1));
}

#[actix_rt::test]
async fn team_status_reports_rating() {
    let app = app!();
    let me = Uuid::new_v4();

    let req = as_player(TestRequest::get().uri("/api/team/status"), me).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let status = body(resp).await;
    assert_eq!(status["rating"], Value::Null);
    assert_eq!(status["team_chemistry_points"], json!(0));

    let cards = claim_pack!(app, me);
    let goalie = cards
        .iter()
        .find(|c| c["position"] == json!("Goaltender"))
        .cloned()
        .unwrap();
    let req = as_player(TestRequest::post().uri("/api/team/roster/place"), me)
        .set_json(json!({ "user_card_id": goalie["user_card_id"], "field_position": "G" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = as_player(TestRequest::get().uri("/api/team/status"), me).to_request();
    let status = body(test::call_service(&app, req).await).await;
    assert_eq!(status["rating"], goalie["modified_stats"]["current_ovr"]);
    assert_eq!(status["team_chemistry_points"], json!(1));
}

#[actix_rt::test]
async fn goalie_skill_on_forward_is_bad_request() {
    let app = app!();
    let me = Uuid::new_v4();
    let cards = claim_pack!(app, me);
    let fwd = id_of(&cards, "Forward", 0);
    let fwd = fwd.as_str().unwrap();

    // skill 6 is the goalie-only Reaction
    let req = as_player(
        TestRequest::post().uri(&format!("/api/inventory/player-cards/{fwd}/add-skill")),
        me,
    )
    .set_json(json!({ "skill_template_id": 6 }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(resp).await["error"], json!("role_mismatch"));

    let req = as_player(
        TestRequest::post().uri(&format!("/api/inventory/player-cards/{fwd}/add-skill")),
        me,
    )
    .set_json(json!({ "skill_template_id": 1 }))
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = as_player(
        TestRequest::get().uri(&format!("/api/inventory/player-cards/{fwd}/skills")),
        me,
    )
    .to_request();
    let skills = body(test::call_service(&app, req).await).await;
    assert_eq!(skills[0]["skill_name"], json!("Shot"));
}

#[cfg(debug_assertions)]
#[actix_rt::test]
async fn granted_boost_is_spent() {
    let app = app!();
    let me = Uuid::new_v4();
    let cards = claim_pack!(app, me);
    let fwd = id_of(&cards, "Forward", 0);
    let fwd = fwd.as_str().unwrap();

    let req = as_player(TestRequest::post().uri("/api/inventory/grant"), me)
        .set_json(json!({ "kind": "boost", "template_id": 1, "quantity": 1 }))
        .to_request();
    let stack = body(test::call_service(&app, req).await).await;
    let stack_id = stack["id"].clone();

    let req = as_player(
        TestRequest::post().uri(&format!("/api/inventory/player-cards/{fwd}/apply-boost")),
        me,
    )
    .set_json(json!({ "skill_template_id": 1, "user_boost_inventory_id": stack_id }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let out = body(resp).await;
    assert_eq!(out["skill"]["boost_points_added"], json!(5));
    assert_eq!(out["remaining_quantity"], json!(0));

    let req = as_player(TestRequest::get().uri("/api/inventory/boosts"), me).to_request();
    let boosts = body(test::call_service(&app, req).await).await;
    assert_eq!(boosts, json!([]));

    // spent stack no longer exists
    let req = as_player(
        TestRequest::post().uri(&format!("/api/inventory/player-cards/{fwd}/apply-boost")),
        me,
    )
    .set_json(json!({ "skill_template_id": 1, "user_boost_inventory_id": stack_id }))
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
