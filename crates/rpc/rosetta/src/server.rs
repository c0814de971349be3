use std::{net::SocketAddr, sync::Arc, time::Duration};

use actix_web::{
    App, HttpResponse, HttpServer,
    http::Method,
    middleware::{self, Condition, DefaultHeaders},
    web::{self, Data, ServiceConfig},
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    config::{RosettaConfig, RpcServerConfig},
    handlers::SharedClient,
    routes::register_routers,
};

/// Time a client gets to send the request head.
const CLIENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const KEEP_ALIVE: Duration = Duration::from_secs(30);

/// A type alias for a function that configures the actix-web ServiceConfig.
type Configurator = dyn Fn(&mut ServiceConfig) + Send + Sync;

/// A builder for configuring and starting an RPC server.
pub struct RpcServerBuilder {
    http_socket_address: SocketAddr,
    http_allow_origin: bool,
    configurators: Vec<Arc<Configurator>>,
}

impl RpcServerBuilder {
    pub fn new(http_socket_address: SocketAddr) -> Self {
        Self {
            http_socket_address,
            http_allow_origin: false,
            configurators: Vec::new(),
        }
    }

    /// Answer CORS preflights and allow requests from any origin.
    pub fn allow_origin(mut self, allow: bool) -> Self {
        self.http_allow_origin = allow;
        self
    }

    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ServiceConfig) + Send + Sync + 'static,
    {
        self.configurators.push(Arc::new(f));
        self
    }

    pub fn with_data<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.configurators
            .push(Arc::new(move |cfg: &mut ServiceConfig| {
                cfg.app_data(Data::new(value.clone()));
            }));
        self
    }

    /// Serves until `shutdown` is cancelled, then stops gracefully.
    pub async fn start(self, shutdown: CancellationToken) -> std::io::Result<()> {
        let configurators = self.configurators.clone();
        let configure_all = move |cfg: &mut ServiceConfig| {
            for c in &configurators {
                c(cfg);
            }
        };
        let allow_origin = self.http_allow_origin;

        info!("starting HTTP server on {:?}", self.http_socket_address);

        let server = HttpServer::new(move || {
            let mut app = App::new()
                .wrap(Condition::new(allow_origin, cors_headers()))
                .wrap(middleware::Logger::default())
                .configure(configure_all.clone());
            if allow_origin {
                app = app.route(
                    "/{tail:.*}",
                    web::method(Method::OPTIONS).to(HttpResponse::Ok),
                );
            }
            app
        })
        .client_request_timeout(CLIENT_REQUEST_TIMEOUT)
        .keep_alive(KEEP_ALIVE)
        .disable_signals()
        .bind(self.http_socket_address)?
        .run();

        let handle = server.handle();
        tokio::spawn(async move {
            shutdown.cancelled().await;
            info!("stopping HTTP server");
            handle.stop(true).await;
        });

        server.await
    }
}

fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/// Start the Rosetta API server.
pub async fn start(
    server_config: RpcServerConfig,
    rosetta_config: RosettaConfig,
    client: SharedClient,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    RpcServerBuilder::new(server_config.http_socket_address)
        .allow_origin(server_config.http_allow_origin)
        .with_data(rosetta_config)
        .with_data(client)
        .with_data(shutdown.clone())
        .configure(register_routers)
        .start(shutdown)
        .await
}
