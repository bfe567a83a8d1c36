#![allow(dead_code)]

use axum_test::TestServer;
use myblog::routes::app_router;
use myblog::state::AppState;
use myblog::urls::root_urlconf;
use std::sync::Arc;

pub const ENTRY_PATH: &str = "/2024/3/15/42-hello-world/";

pub fn create_test_state(blog_prefix: &str, append_slash: bool, debug: bool) -> AppState {
    let resolver = root_urlconf(blog_prefix).compile().unwrap();
    AppState::new(Arc::new(resolver), append_slash, debug)
}

/// Full application router over the project route table.
pub fn make_server(blog_prefix: &str, append_slash: bool, debug: bool) -> TestServer {
    let state = create_test_state(blog_prefix, append_slash, debug);
    TestServer::new(app_router(state)).unwrap()
}
