//! Dockerfile and docker-compose.yml
//!
//! The composition is built as typed service records and serialized, so the service
//! set and `depends_on` edges can be checked as data.

use super::{Artifact, ArtifactKind};
use crate::error::{Result, ScaffoldError};
use crate::fragments::env::{self, DEFAULT_PORT};
use crate::fragments::runtime::POSTGRES_PORT;
use crate::options::ProjectOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const APP_SERVICE: &str = "app";
pub const POSTGRES_SERVICE: &str = "postgres";
pub const REDIS_SERVICE: &str = "redis";
pub const POSTGRES_VOLUME: &str = "postgres-data";

const DOCKERFILE: &str = r#"# Build stage
FROM node:20-alpine AS build
WORKDIR /app
RUN apk add --no-cache python3 make g++
COPY package*.json ./
RUN npm install
COPY . .
RUN npm run build

# Runtime stage
FROM node:20-alpine
WORKDIR /app
ENV NODE_ENV=production
RUN apk add --no-cache python3 make g++
COPY package*.json ./
RUN npm install --omit=dev
COPY --from=build /app/dist ./dist
COPY --from=build /app/bin ./bin
EXPOSE 3000
CMD ["node", "dist/index.js"]
"#;

/// One service in the composition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub restart: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_file: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
}

/// Top-level named volume; docker's defaults are used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedVolume {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeFile {
    pub services: BTreeMap<String, Service>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, NamedVolume>,
}

impl ComposeFile {
    /// Service names, sorted
    pub fn service_names(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }
}

/// Build the service set: the app, plus postgres and redis when selected
pub fn select_services(options: &ProjectOptions) -> ComposeFile {
    let mut services = BTreeMap::new();
    let mut volumes = BTreeMap::new();

    let mut app = Service {
        build: Some(".".to_string()),
        restart: "unless-stopped".to_string(),
        ports: vec![format!("{port}:{port}", port = DEFAULT_PORT)],
        env_file: vec![".env".to_string()],
        ..Default::default()
    };

    if options.is_postgres() {
        app.environment
            .insert(env::DB_HOST.to_string(), POSTGRES_SERVICE.to_string());
        app.depends_on.push(POSTGRES_SERVICE.to_string());

        let environment = BTreeMap::from([
            ("POSTGRES_USER".to_string(), format!("${{{}}}", env::DB_USER)),
            ("POSTGRES_PASSWORD".to_string(), format!("${{{}}}", env::DB_PASSWORD)),
            ("POSTGRES_DB".to_string(), format!("${{{}}}", env::DB_NAME)),
        ]);

        services.insert(
            POSTGRES_SERVICE.to_string(),
            Service {
                image: Some("postgres:16-alpine".to_string()),
                restart: "unless-stopped".to_string(),
                ports: vec![format!("{port}:{port}", port = POSTGRES_PORT)],
                environment,
                volumes: vec![format!("{}:/var/lib/postgresql/data", POSTGRES_VOLUME)],
                ..Default::default()
            },
        );
        volumes.insert(POSTGRES_VOLUME.to_string(), NamedVolume {});
    } else {
        // Keep the embedded database file outside the container.
        app.volumes.push("./data:/app/data".to_string());
    }

    if options.use_redis() {
        app.environment
            .insert(env::REDIS_HOST.to_string(), REDIS_SERVICE.to_string());
        app.depends_on.push(REDIS_SERVICE.to_string());

        services.insert(
            REDIS_SERVICE.to_string(),
            Service {
                image: Some("redis:7-alpine".to_string()),
                restart: "unless-stopped".to_string(),
                ports: vec![format!("{port}:{port}", port = env::DEFAULT_REDIS_PORT)],
                ..Default::default()
            },
        );
    }

    services.insert(APP_SERVICE.to_string(), app);

    ComposeFile { services, volumes }
}

/// Fixed image definition
pub fn compose_dockerfile() -> Result<Artifact> {
    Ok(Artifact::new(ArtifactKind::Dockerfile, DOCKERFILE))
}

/// Multi-service composition for the chosen database and queue
pub fn compose_compose_file(options: &ProjectOptions) -> Result<Artifact> {
    let compose = select_services(options);
    let yaml = serde_yaml::to_string(&compose)
        .map_err(|e| ScaffoldError::serialize("docker-compose.yml", e))?;
    Ok(Artifact::new(ArtifactKind::Compose, yaml))
}
