use patientql_server::{AppConfig, build_app};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

async fn start_server() -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let app = build_app(&AppConfig::default(), patientql_db_memory::create_storage())
        .expect("build app");

    // Bind to an ephemeral port
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

async fn post_graphql(client: &reqwest::Client, base: &str, body: Value) -> Value {
    let resp = client
        .post(format!("{base}/graphql"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn server_endpoints_work() {
    let (base, shutdown_tx, handle) = start_server().await;
    let client = reqwest::Client::new();

    // GET /
    let resp = client.get(format!("{base}/")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["service"], "patientql");
    assert_eq!(body["graphql"], "/graphql");

    // GET /healthz
    let resp = client.get(format!("{base}/healthz")).send().await.unwrap();
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    // Caller-supplied request id is echoed back
    let resp = client
        .get(format!("{base}/healthz"))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "abc-123");

    // POST /graphql create + read
    let created = post_graphql(
        &client,
        &base,
        json!({
            "query": "mutation($n: String!, $e: String!) { createPatient(name: $n, email: $e) { id } }",
            "variables": {"n": "Ada", "e": "ada@example.com"}
        }),
    )
    .await;
    assert!(created.get("errors").is_none(), "{created}");
    let id = created["data"]["createPatient"]["id"].as_i64().unwrap();

    let post = post_graphql(
        &client,
        &base,
        json!({
            "query": format!(
                "mutation {{ createPost(title: \"Hi\", content: \"there\", Patient_id: {id}) {{ id }} }}"
            )
        }),
    )
    .await;
    assert!(post.get("errors").is_none(), "{post}");

    let read = post_graphql(
        &client,
        &base,
        json!({ "query": "{ posts { title Patient { name email } } }" }),
    )
    .await;
    assert_eq!(
        read["data"]["posts"],
        json!([{ "title": "Hi", "Patient": { "name": "Ada", "email": "ada@example.com" } }])
    );

    // GET /graphql with a query param
    let resp = client
        .get(format!("{base}/graphql"))
        .query(&[("query", "{ Patients { name } }")])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["Patients"], json!([{ "name": "Ada" }]));

    // GET refuses mutations without touching storage
    let resp = client
        .get(format!("{base}/graphql"))
        .query(&[("query", "mutation { createPatient(name: \"x\", email: \"y\") { id } }")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
    assert_eq!(resp.headers()["allow"], "POST");
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0]["extensions"]["code"], "METHOD_NOT_ALLOWED");

    let count = post_graphql(&client, &base, json!({ "query": "{ Patients { id } }" })).await;
    assert_eq!(count["data"]["Patients"].as_array().unwrap().len(), 1);

    // GET /graphql without a query serves GraphiQL
    let resp = client.get(format!("{base}/graphql")).send().await.unwrap();
    assert!(resp.status().is_success());
    let ctype = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(ctype.starts_with("text/html"));

    // Field errors are reported in the envelope with status 200
    let missing = post_graphql(
        &client,
        &base,
        json!({ "query": "mutation { updatePatient(id: 9999, name: \"x\", email: \"y\") { id } }" }),
    )
    .await;
    assert_eq!(missing["errors"][0]["extensions"]["code"], "NOT_FOUND");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
