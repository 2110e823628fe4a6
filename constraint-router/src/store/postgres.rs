use tokio_postgres::NoTls;

use constraint_router_core::model::cost::DEFAULT_RISK;
use constraint_router_core::model::network::{Edge, GraphBundle, Node, NodeId, NodeIdx};

use crate::config::AppConfig;

use super::graph_source::GraphSource;
use super::store_error::StoreError;

/// Maximum rows fetched per cursor round-trip.
const CHUNK_SIZE: i64 = 10_000;

/// Postgres-backed implementation of the graph loader. Opens a fresh
/// connection per city load: loads are rare (one per city, for the process
/// lifetime) and single-flighted by `GraphCache`, so a small connection pool
/// would sit idle almost all the time. A production deployment with many
/// cities would front this with `deadpool-postgres`; omitted here since the
/// process-wide graph cache already bounds concurrent loads to one per city.
pub struct PostgresGraphSource {
    conn_string: String,
}

impl PostgresGraphSource {
    pub fn new(config: &AppConfig) -> Self {
        let conn_string = format!(
            "host={} port={} dbname={} user={} password={}",
            config.db_host, config.db_port, config.db_name, config.db_user, config.db_password
        );
        PostgresGraphSource { conn_string }
    }

    /// Reads every row of `nodes` for `city_id` through a server-side cursor,
    /// pulling at most `CHUNK_SIZE` rows per `FETCH` rather than materializing
    /// the whole city in one round trip.
    async fn fetch_nodes(client: &tokio_postgres::Client, city_id: i64) -> Result<Vec<Node>, StoreError> {
        let transaction = client.transaction().await?;
        transaction
            .execute(
                "DECLARE node_cursor CURSOR FOR SELECT osmid, x, y FROM nodes WHERE city_id = $1",
                &[&city_id],
            )
            .await?;

        let mut nodes = Vec::new();
        loop {
            let rows = transaction
                .query(&format!("FETCH {CHUNK_SIZE} FROM node_cursor"), &[])
                .await?;
            if rows.is_empty() {
                break;
            }
            for row in &rows {
                let osmid: i64 = row.get(0);
                let x: f64 = row.get(1);
                let y: f64 = row.get(2);
                nodes.push(Node { id: NodeId(osmid), x, y });
            }
        }
        transaction.commit().await?;
        Ok(nodes)
    }

    /// Reads every row of `edges` for `city_id` the same way, defaulting
    /// nullable risk/travel-time columns to the cost model's fallback values.
    /// `src`/`dst` on the returned [`Edge`] are placeholders: [`GraphBundle::new`]
    /// resolves them from the accompanying `NodeId` pair.
    async fn fetch_edges(
        client: &tokio_postgres::Client,
        city_id: i64,
    ) -> Result<Vec<(NodeId, NodeId, Edge)>, StoreError> {
        let transaction = client.transaction().await?;
        transaction
            .execute(
                "DECLARE edge_cursor CURSOR FOR \
                 SELECT u, v, length, travel_time, highway, lit, temp_risk, security_risk \
                 FROM edges WHERE city_id = $1",
                &[&city_id],
            )
            .await?;

        let mut edges = Vec::new();
        loop {
            let rows = transaction
                .query(&format!("FETCH {CHUNK_SIZE} FROM edge_cursor"), &[])
                .await?;
            if rows.is_empty() {
                break;
            }
            for row in &rows {
                let u: i64 = row.get(0);
                let v: i64 = row.get(1);
                let length: f64 = row.get(2);
                let travel_time: Option<f64> = row.get(3);
                let highway: Option<String> = row.get(4);
                let lit: Option<bool> = row.get(5);
                let temp_risk: Option<f64> = row.get(6);
                let security_risk: Option<f64> = row.get(7);

                let edge = Edge {
                    src: NodeIdx(0),
                    dst: NodeIdx(0),
                    length,
                    travel_time: travel_time.unwrap_or(length / 8.0),
                    highway: highway.unwrap_or_default(),
                    lit: lit.unwrap_or(false),
                    temp_risk: temp_risk.unwrap_or(DEFAULT_RISK),
                    security_risk: security_risk.unwrap_or(DEFAULT_RISK),
                };
                edges.push((NodeId(u), NodeId(v), edge));
            }
        }
        transaction.commit().await?;
        Ok(edges)
    }
}

impl GraphSource for PostgresGraphSource {
    /// Loads a city's full node and edge set in bounded chunks, returning a
    /// complete, immutable [`GraphBundle`]. Never publishes a partial result:
    /// a failure at any point during the load returns an error, and nothing
    /// it read is retained by the caller.
    async fn load_city(&self, city: &str) -> Result<GraphBundle, StoreError> {
        let (client, connection) = tokio_postgres::connect(&self.conn_string, NoTls).await?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("postgres connection closed with error: {e}");
            }
        });

        let city_row = client
            .query_opt("SELECT id FROM cities WHERE name = $1", &[&city])
            .await?;
        let city_id: i64 = match city_row {
            Some(row) => row.get(0),
            None => return Err(StoreError::CityUnknown(city.to_string())),
        };

        let nodes = Self::fetch_nodes(&client, city_id).await?;
        let raw_edges = Self::fetch_edges(&client, city_id).await?;

        GraphBundle::new(nodes, raw_edges).map_err(StoreError::from)
    }
}
