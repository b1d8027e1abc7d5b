use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;
use tokio::sync::OnceCell;

/// Database name embedded in fixture URIs.
pub const FIXTURE_DATABASE: &str = "pandal-navigator";

pub struct MongoFixture {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    host: String,
    port: u16
}

impl MongoFixture {
    /// Connection string pointing at [`FIXTURE_DATABASE`].
    pub fn url(&self) -> String {
        self.url_for(FIXTURE_DATABASE)
    }

    pub fn url_for(&self, database: &str) -> String {
        format!(
            "mongodb://{}:{}/{}?directConnection=true",
            self.host, self.port, database
        )
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

static MONGO: OnceCell<Option<MongoFixture>> = OnceCell::const_new();

pub async fn mongo() -> Option<&'static MongoFixture> {
    MONGO
        .get_or_init(|| async {
            match Mongo::default().start().await {
                Ok(container) => {
                    let port = match container.get_host_port_ipv4(27017).await {
                        Ok(p) => p,
                        Err(e) => {
                            tracing::warn!("Failed to get MongoDB port: {:?}", e);
                            return None;
                        }
                    };
                    tracing::info!("MongoDB fixture started on port {}", port);
                    Some(MongoFixture {
                        container,
                        host: "localhost".to_string(),
                        port
                    })
                }
                Err(e) => {
                    tracing::warn!("Failed to start MongoDB container: {:?}", e);
                    None
                }
            }
        })
        .await
        .as_ref()
}
