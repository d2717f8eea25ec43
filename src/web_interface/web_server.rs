use std::net::SocketAddr;
use std::sync::Arc;

use log::info;
use warp::Filter;

use crate::error_handling::types::WebError;
use crate::web_interface::routes;
use crate::web_interface::types::AppState;

/// Web server exposing the program listing and the favorites operations.
pub struct WebServer {
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new WebServer instance over the shared state.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Start the web server on the given address and port. Runs until the
    /// process is stopped.
    pub async fn start(&self, bind_address: &str, port: u16) -> Result<(), WebError> {
        let routes = routes::dashboard_route()
            .or(routes::program_route(self.state.clone()))
            .or(routes::toggle_favorite_route(self.state.clone()))
            .or(routes::list_favorites_route(self.state.clone()));

        let addr: SocketAddr = format!("{}:{}", bind_address, port).parse().map_err(|e| {
            WebError::InvalidBindAddress(format!("{}:{} ({})", bind_address, port, e))
        })?;

        info!("Web interface listening on {}", addr);
        warp::serve(routes).run(addr).await;

        Ok(())
    }
}
