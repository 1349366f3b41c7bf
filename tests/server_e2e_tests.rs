//! End-to-End Server Tests
//!
//! Binds a real listener, drives it over HTTP and checks that shutting the
//! server down leaves no background task behind.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use task_switch::{api::create_router, tasks::TaskStatus, AppState, TaskController};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

struct TestServer {
    base_url: String,
    controller: Arc<TaskController>,
    shutdown_tx: oneshot::Sender<()>,
    server: JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let state = AppState::new(TaskController::new(TICK_INTERVAL));
        let controller = state.controller.clone();
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server_controller = controller.clone();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
            server_controller.shutdown().await;
        });

        Self {
            base_url: format!("http://{addr}"),
            controller,
            shutdown_tx,
            server,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, client: &reqwest::Client, path: &str) -> Value {
        let response = client.get(self.url(path)).send().await.unwrap();
        assert!(response.status().is_success());
        response.json().await.unwrap()
    }

    async fn post_json(&self, client: &reqwest::Client, path: &str) -> Value {
        let response = client.post(self.url(path)).send().await.unwrap();
        assert!(response.status().is_success());
        response.json().await.unwrap()
    }

    async fn stop_server(self) -> Arc<TaskController> {
        self.shutdown_tx.send(()).unwrap();
        self.server.await.unwrap();
        self.controller
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_end_to_end_scenario() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let json = server.get_json(&client, "/status").await;
    assert_eq!(json["status"], "not_started");
    assert_eq!(json["task_running"], false);

    let json = server.post_json(&client, "/start").await;
    assert_eq!(json["status"], "started");

    tokio::time::sleep(TICK_INTERVAL * 3).await;

    let json = server.get_json(&client, "/status").await;
    assert_eq!(json["status"], "running");
    assert_eq!(json["task_running"], true);

    let json = server.post_json(&client, "/start").await;
    assert_eq!(json["status"], "already_running");

    let json = server.post_json(&client, "/stop").await;
    assert_eq!(json["status"], "stopped");

    let json = server.get_json(&client, "/status").await;
    assert_eq!(json["status"], "stopped");
    assert_eq!(json["task_running"], false);

    let json = server.post_json(&client, "/stop").await;
    assert_eq!(json["status"], "not_running");

    server.stop_server().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_cancels_running_task() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let json = server.post_json(&client, "/start").await;
    assert_eq!(json["status"], "started");
    tokio::time::sleep(TICK_INTERVAL * 3).await;

    let controller = server.stop_server().await;

    let report = controller.status().await;
    assert_eq!(report.status, TaskStatus::Stopped);
    assert!(!report.task_running);

    let ticks = controller.ticks();
    tokio::time::sleep(TICK_INTERVAL * 4).await;
    assert_eq!(controller.ticks(), ticks);
}
