use crate::common::{routes, TestApp};

#[tokio::test]
async fn fresh_instance_reports_new() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::INSTANCE).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["is_new"], true);
}

#[tokio::test]
async fn bootstrap_creates_owner_and_returns_password() {
    let app = TestApp::spawn().await;

    let res = app
        .post_form(
            routes::BOOTSTRAP,
            &[("email", "owner@example.com"), ("username", "owner")],
        )
        .await;
    assert_eq!(res.status, 201, "body: {}", res.text);
    assert_eq!(res.body["username"], "owner");

    let password = res.body["password"].as_str().unwrap();
    assert!(!password.is_empty());

    // The generated password must actually work for login.
    let res = app
        .post_form(
            routes::LOGIN,
            &[("username", "owner"), ("password", password)],
        )
        .await;
    assert_eq!(res.status, 303);

    let res = app.get(routes::INSTANCE).await;
    assert_eq!(res.body["is_new"], false);
}

#[tokio::test]
async fn bootstrap_display_name_shows_up_in_profile() {
    let app = TestApp::spawn().await;

    let res = app
        .post_form(
            routes::BOOTSTRAP,
            &[
                ("email", "owner@example.com"),
                ("username", "owner"),
                ("display_name", " The Dungeon Master "),
            ],
        )
        .await;
    assert_eq!(res.status, 201, "body: {}", res.text);
    let password = res.body["password"].as_str().unwrap().to_string();

    let res = app
        .post_form(
            routes::LOGIN,
            &[("username", "owner"), ("password", &password)],
        )
        .await;
    assert_eq!(res.status, 303);

    let res = app.get(routes::ME).await;
    assert_eq!(res.body["display_name"], "The Dungeon Master");
}

#[tokio::test]
async fn second_bootstrap_is_rejected() {
    let app = TestApp::spawn().await;
    app.bootstrap("owner@example.com", "owner").await;

    let res = app
        .post_form(
            routes::BOOTSTRAP,
            &[("email", "other@example.com"), ("username", "other")],
        )
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "INSTANCE_EXISTS");
}

#[tokio::test]
async fn bootstrap_rejects_invalid_input() {
    let app = TestApp::spawn().await;

    // Missing fields.
    let res = app
        .post_form(routes::BOOTSTRAP, &[("email", ""), ("username", "")])
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    // Malformed email.
    let res = app
        .post_form(
            routes::BOOTSTRAP,
            &[("email", "not-an-email"), ("username", "owner")],
        )
        .await;
    assert_eq!(res.status, 400);

    // Username too short.
    let res = app
        .post_form(
            routes::BOOTSTRAP,
            &[("email", "owner@example.com"), ("username", "ab")],
        )
        .await;
    assert_eq!(res.status, 400);

    // Consecutive dots in the username.
    let res = app
        .post_form(
            routes::BOOTSTRAP,
            &[("email", "owner@example.com"), ("username", "a..b")],
        )
        .await;
    assert_eq!(res.status, 400);

    // Invalid attempts must not consume the fresh-instance slot.
    let res = app.get(routes::INSTANCE).await;
    assert_eq!(res.body["is_new"], true);
}

#[tokio::test]
async fn reset_requires_authentication() {
    let app = TestApp::spawn().await;
    app.bootstrap("owner@example.com", "owner").await;

    let res = app.post_empty(routes::RESET).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn reset_returns_instance_to_fresh_state() {
    let app = TestApp::spawn().await;
    let password = app.login_as_owner().await;

    let res = app.post_empty(routes::RESET).await;
    assert_eq!(res.status, 204);

    // Back to a fresh instance.
    let res = app.get(routes::INSTANCE).await;
    assert_eq!(res.body["is_new"], true);

    // The session that performed the reset is gone.
    let res = app.get(routes::ME).await;
    assert_eq!(res.status, 401);

    // And the old credentials no longer exist.
    let res = app
        .post_form(
            routes::LOGIN,
            &[("username", "owner"), ("password", &password)],
        )
        .await;
    assert_eq!(res.status, 401);

    // A new owner can be bootstrapped afterwards.
    app.bootstrap("new-owner@example.com", "new.owner").await;
    let res = app.get(routes::INSTANCE).await;
    assert_eq!(res.body["is_new"], false);
}
