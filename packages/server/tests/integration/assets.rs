use crate::common::{routes, TestApp};

#[tokio::test]
async fn uploads_require_authentication() {
    let app = TestApp::spawn().await;
    app.bootstrap("owner@example.com", "owner").await;

    let res = app
        .post_upload("map", "map.png", b"not really a png".to_vec())
        .await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "AUTH_REQUIRED");

    let res = app.get(routes::ASSETS).await;
    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn upload_stores_content_hash() {
    let app = TestApp::spawn().await;
    app.login_as_owner().await;

    let res = app
        .post_upload("dungeon map", "map.png", b"tile data".to_vec())
        .await;
    assert_eq!(res.status, 201, "body: {}", res.text);
    assert_eq!(res.body["name"], "dungeon map");

    let hash = res.body["content_hash"].as_str().unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn upload_name_falls_back_to_file_name() {
    let app = TestApp::spawn().await;
    app.login_as_owner().await;

    let res = app
        .post_upload("", "token.webp", b"token bytes".to_vec())
        .await;
    assert_eq!(res.status, 201, "body: {}", res.text);
    assert_eq!(res.body["name"], "token.webp");
}

#[tokio::test]
async fn identical_contents_share_one_blob() {
    let app = TestApp::spawn().await;
    app.login_as_owner().await;

    let first = app
        .post_upload("copy one", "a.bin", b"same bytes".to_vec())
        .await;
    let second = app
        .post_upload("copy two", "b.bin", b"same bytes".to_vec())
        .await;
    assert_eq!(first.status, 201);
    assert_eq!(second.status, 201);

    // Two rows, one content hash.
    assert_ne!(first.body["id"], second.body["id"]);
    assert_eq!(first.body["content_hash"], second.body["content_hash"]);

    let res = app.get(routes::ASSETS).await;
    assert_eq!(res.body["total"], 2);
}

#[tokio::test]
async fn download_roundtrips_the_bytes() {
    let app = TestApp::spawn().await;
    app.login_as_owner().await;

    let contents = b"PNG-ish payload".to_vec();
    let res = app.post_upload("map", "map.png", contents.clone()).await;
    let id = res.body["id"].as_i64().unwrap() as i32;
    let hash = res.body["content_hash"].as_str().unwrap().to_string();

    let (status, headers, body) = app.get_bytes(&routes::asset_download(id)).await;
    assert_eq!(status, 200);
    assert_eq!(body, contents);

    let etag = headers.get("etag").unwrap().to_str().unwrap();
    assert_eq!(etag, format!("\"{hash}\""));
    let content_type = headers.get("content-type").unwrap().to_str().unwrap();
    assert_eq!(content_type, "image/png");
}

#[tokio::test]
async fn download_honors_if_none_match() {
    let app = TestApp::spawn().await;
    app.login_as_owner().await;

    let res = app.post_upload("map", "map.png", b"payload".to_vec()).await;
    let id = res.body["id"].as_i64().unwrap() as i32;
    let hash = res.body["content_hash"].as_str().unwrap().to_string();

    let conditional_get = |header: String| {
        let url = format!("http://{}{}", app.addr, routes::asset_download(id));
        let client = &app.client;
        async move {
            client
                .get(url)
                .header("if-none-match", header)
                .send()
                .await
                .expect("Failed to send conditional GET")
        }
    };

    let response = conditional_get(format!("\"{hash}\"")).await;
    assert_eq!(response.status().as_u16(), 304);
    assert!(response.bytes().await.unwrap().is_empty());

    // Weak validators and tag lists revalidate too.
    let response = conditional_get(format!("W/\"{hash}\"")).await;
    assert_eq!(response.status().as_u16(), 304);
    let response = conditional_get(format!("\"stale\", \"{hash}\"")).await;
    assert_eq!(response.status().as_u16(), 304);

    // A non-matching tag still gets the full body.
    let response = conditional_get("\"stale\"".to_string()).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_asset_id_is_not_found() {
    let app = TestApp::spawn().await;
    app.login_as_owner().await;

    let (status, _, _) = app.get_bytes(&routes::asset_download(9999)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn reset_clears_assets() {
    let app = TestApp::spawn().await;
    app.login_as_owner().await;

    let res = app.post_upload("map", "map.png", b"payload".to_vec()).await;
    assert_eq!(res.status, 201);

    let res = app.post_empty(routes::RESET).await;
    assert_eq!(res.status, 204);

    // New owner starts with an empty library.
    let password = app.bootstrap("second@example.com", "second").await;
    let res = app
        .post_form(
            routes::LOGIN,
            &[("username", "second"), ("password", &password)],
        )
        .await;
    assert_eq!(res.status, 303);

    let res = app.get(routes::ASSETS).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["total"], 0);
}
