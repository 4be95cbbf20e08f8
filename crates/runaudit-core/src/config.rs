//! Process configuration.
//!
//! One [`Config`] is built from the environment at startup and passed by
//! reference into the components that need it; nothing else reads the
//! environment ad hoc. Presence is the only validation applied here —
//! empty values are caught later by record validation.

use std::env;
use std::path::PathBuf;

use crate::error::CollectionError;

/// Complete configuration for one audit emission.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pod or host name (`POD_NAME`).
    pub pod_name: String,

    /// Deployment namespace (`NAMESPACE`).
    pub namespace: String,

    /// Workflow identifier (`AIRFLOW_DAG_ID`).
    pub dag_id: String,

    /// Run identifier (`AIRFLOW_RUN_ID`).
    pub run_id: String,

    /// Task identifier (`AIRFLOW_TASK_ID`).
    pub task_id: String,

    /// Root of the local git checkout (`GIT_REPO_PATH`).
    pub git_repo_path: PathBuf,

    /// Workflow metadata database URL (`AIRFLOW_DB_URL`), used for the
    /// triggered-by fallback lookup on non-scheduled runs.
    pub airflow_db_url: String,

    /// The delivery backend for this deployment.
    pub sink: SinkConfig,
}

/// Delivery backend selection (`AUDIT_SINK`), with per-backend connection
/// parameters. Exactly one backend is active per deployment.
#[derive(Debug, Clone)]
pub enum SinkConfig {
    /// HTTP audit proxy: POST to `<base_url>/report`.
    Proxy {
        /// Proxy base URL (`AUDIT_PROXY_URL`).
        base_url: String,
    },

    /// Search-index document store.
    Index {
        /// Index server base URL (`AUDIT_INDEX_URL`).
        url: String,
        /// Index name (`AUDIT_INDEX_NAME`).
        index: String,
        /// Basic-auth username (`AUDIT_INDEX_USERNAME`).
        username: String,
        /// Basic-auth password (`AUDIT_INDEX_PASSWORD`).
        password: String,
    },

    /// Relational append-only log via stored procedure.
    Procedure {
        /// Database URL for the audit log store (`AUDIT_PROCEDURE_DB_URL`).
        database_url: String,
    },
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, CollectionError> {
        let sink = match require("AUDIT_SINK")?.as_str() {
            "proxy" => SinkConfig::Proxy {
                base_url: require("AUDIT_PROXY_URL")?,
            },
            "index" => SinkConfig::Index {
                url: require("AUDIT_INDEX_URL")?,
                index: require("AUDIT_INDEX_NAME")?,
                username: require("AUDIT_INDEX_USERNAME")?,
                password: require("AUDIT_INDEX_PASSWORD")?,
            },
            "procedure" => SinkConfig::Procedure {
                database_url: require("AUDIT_PROCEDURE_DB_URL")?,
            },
            other => return Err(CollectionError::UnknownSink(other.to_string())),
        };

        Ok(Self {
            pod_name: require("POD_NAME")?,
            namespace: require("NAMESPACE")?,
            dag_id: require("AIRFLOW_DAG_ID")?,
            run_id: require("AIRFLOW_RUN_ID")?,
            task_id: require("AIRFLOW_TASK_ID")?,
            git_repo_path: PathBuf::from(require("GIT_REPO_PATH")?),
            airflow_db_url: require("AIRFLOW_DB_URL")?,
            sink,
        })
    }
}

fn require(name: &'static str) -> Result<String, CollectionError> {
    env::var(name).map_err(|_| CollectionError::MissingEnv { name })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-wide environment is only mutated in one
    // place; set_var is unsafe under edition 2024.
    #[test]
    fn from_env_reads_full_proxy_configuration() {
        // SAFETY: We're in a test and controlling the environment
        unsafe {
            env::set_var("POD_NAME", "airflow-worker-0");
            env::set_var("NAMESPACE", "team-pipelines");
            env::set_var("AIRFLOW_DAG_ID", "nightly-load");
            env::set_var("AIRFLOW_RUN_ID", "scheduled__2024-01-01T000000");
            env::set_var("AIRFLOW_TASK_ID", "extract");
            env::set_var("GIT_REPO_PATH", "/workspace/repo");
            env::set_var("AIRFLOW_DB_URL", "postgres://airflow@db:5432/airflow");
            env::set_var("AUDIT_SINK", "proxy");
            env::set_var("AUDIT_PROXY_URL", "http://audit-proxy");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.pod_name, "airflow-worker-0");
        assert_eq!(config.dag_id, "nightly-load");
        assert_eq!(config.git_repo_path, PathBuf::from("/workspace/repo"));
        assert!(matches!(
            config.sink,
            SinkConfig::Proxy { ref base_url } if base_url == "http://audit-proxy"
        ));

        // An unknown backend name is rejected with the offending value.
        // SAFETY: Cleanup in test
        unsafe {
            env::set_var("AUDIT_SINK", "carrier-pigeon");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, CollectionError::UnknownSink(ref s) if s == "carrier-pigeon"));

        // A missing variable names itself.
        // SAFETY: Cleanup in test
        unsafe {
            env::remove_var("AIRFLOW_DB_URL");
            env::set_var("AUDIT_SINK", "proxy");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            CollectionError::MissingEnv {
                name: "AIRFLOW_DB_URL"
            }
        ));
    }
}
