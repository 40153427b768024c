//! Live-metadata table discovery with guaranteed resource release.
//!
//! The physical connection layer is an external collaborator: this module
//! only defines the provider contract ([`ConnectionProvider`] and the
//! resource handles it yields) and the scan itself. A scan exclusively owns
//! the connection, statement, and cursor it acquires for the duration of one
//! call; nothing is pooled, cached, or retained between calls.
//!
//! # Release guarantees
//!
//! Whatever happens mid-scan, each acquired resource is released exactly
//! once, in reverse acquisition order (cursor, then statement, then
//! connection). A release failure is logged at `warn` level and absorbed: it
//! never replaces the scan's result or an earlier raised error, and never
//! stops the remaining releases from being attempted.

use regex::Regex;
use tracing::{debug, warn};

use crate::capability::Capability;
use crate::descriptor::ConnectionDescriptor;
use crate::dispatch::Dispatcher;
use crate::engine::EngineKind;
use crate::error::{DataSourceError, Result};
use crate::params::RawParams;

/// Opens physical metadata sessions for a connection descriptor.
///
/// Implemented by the external pooling/connection layer. `connect` may block
/// on network and auth I/O; failures are `Connectivity` errors and propagate
/// to the scan caller unchanged.
pub trait ConnectionProvider {
    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<Box<dyn MetaConnection>>;
}

/// One live connection, usable for a single metadata scan.
pub trait MetaConnection {
    /// Prepare a metadata statement on this connection.
    fn prepare(&mut self) -> Result<Box<dyn MetaStatement>>;

    /// Release the connection. Called exactly once per scan.
    fn close(&mut self) -> Result<()>;
}

/// A prepared metadata statement.
pub trait MetaStatement {
    /// Query the names of base tables in `database` owned by `owner`.
    ///
    /// Owner comparison uses the identifier case the engine's catalog
    /// stores; callers pass an already-normalized owner.
    fn tables(&mut self, database: &str, owner: &str) -> Result<Box<dyn TableCursor>>;

    /// Release the statement. Called exactly once per scan.
    fn close(&mut self) -> Result<()>;
}

/// Cursor over the table names yielded by a metadata query.
pub trait TableCursor {
    /// Next table name in metadata-scan order, or `None` when exhausted.
    fn next_name(&mut self) -> Result<Option<String>>;

    /// Release the cursor. Called exactly once per scan.
    fn close(&mut self) -> Result<()>;
}

/// Inputs for one table-discovery scan.
///
/// `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct TableScan {
    /// Engine kind of the target database.
    pub engine: EngineKind,
    /// `host:port` address (`host[:port]` list for cluster engines).
    pub address: String,
    /// Database to scan.
    pub database: String,
    /// Full-match regular expression for table names.
    pub pattern: String,
    /// User owning the tables; also the login user.
    pub user: String,
    /// Login password.
    pub password: String,
}

impl TableScan {
    pub fn new(
        engine: EngineKind,
        address: impl Into<String>,
        database: impl Into<String>,
        pattern: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            address: address.into(),
            database: database.into(),
            pattern: pattern.into(),
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for TableScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableScan")
            .field("engine", &self.engine)
            .field("address", &self.address)
            .field("database", &self.database)
            .field("pattern", &self.pattern)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// List the tables whose names fully match the scan pattern.
///
/// The whole name must match, not merely contain a match: a pattern of
/// `^orders.*$` matches `orders_archive` but not `customer_orders`. Matches
/// are returned in metadata-scan order; no match yields an empty vector.
///
/// Config-time failures (bad pattern, bad address, invalid parameters) are
/// raised before the provider is touched. Connect failures are
/// `Connectivity`; anything failing after a connection was obtained is a
/// `Query` error, raised only after the full release sequence has run.
pub fn list_tables(provider: &dyn ConnectionProvider, scan: &TableScan) -> Result<Vec<String>> {
    let matcher = full_match_regex(&scan.pattern)?;
    let params = RawParams::from_address(
        scan.engine,
        &scan.address,
        scan.database.clone(),
        scan.user.clone(),
        scan.password.clone(),
    )?;
    let capability = Dispatcher::capability(scan.engine);
    let descriptor = capability.build_descriptor(&params)?;
    let owner = capability.normalize_owner(&scan.user);

    debug!(
        "scanning tables in {}/{} for owner {} matching {}",
        scan.address, scan.database, owner, scan.pattern
    );

    let mut connection = provider.connect(&descriptor)?;

    let mut statement: Option<Box<dyn MetaStatement>> = None;
    let mut cursor: Option<Box<dyn TableCursor>> = None;
    let outcome = scan_tables(
        connection.as_mut(),
        &mut statement,
        &mut cursor,
        &scan.database,
        &owner,
        &matcher,
    );

    // Best-effort release in reverse acquisition order; failures are logged
    // and never mask the outcome.
    if let Some(mut cursor) = cursor.take() {
        release("result cursor", cursor.close());
    }
    if let Some(mut statement) = statement.take() {
        release("statement", statement.close());
    }
    release("connection", connection.close());

    outcome
}

/// The scan body. Acquired resources are parked in the caller's slots
/// immediately, so the caller can release them on every exit path.
fn scan_tables(
    connection: &mut dyn MetaConnection,
    statement_slot: &mut Option<Box<dyn MetaStatement>>,
    cursor_slot: &mut Option<Box<dyn TableCursor>>,
    database: &str,
    owner: &str,
    matcher: &Regex,
) -> Result<Vec<String>> {
    let statement = statement_slot.insert(connection.prepare().map_err(as_query)?);
    let cursor = cursor_slot.insert(statement.tables(database, owner).map_err(as_query)?);

    let mut tables = Vec::new();
    while let Some(name) = cursor.next_name().map_err(as_query)? {
        if matcher.is_match(&name) {
            tables.push(name);
        }
    }
    Ok(tables)
}

/// Compile `pattern` so that only whole-name matches count.
fn full_match_regex(pattern: &str) -> Result<Regex> {
    Regex::new(&format!(r"\A(?:{pattern})\z")).map_err(|e| {
        DataSourceError::config(format!("invalid table pattern '{pattern}': {e}"))
    })
}

/// Anything that fails after a connection was obtained is a query error.
fn as_query(err: DataSourceError) -> DataSourceError {
    match err {
        DataSourceError::Query(_) => err,
        other => DataSourceError::query(other.to_string()),
    }
}

fn release(resource: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!("failed to release {} after metadata scan: {}", resource, e);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    // =========================================================================
    // Mock provider
    //
    // Records every lifecycle event so tests can assert release counts and
    // ordering exactly.
    // =========================================================================

    type EventLog = Arc<Mutex<Vec<&'static str>>>;

    #[derive(Clone)]
    struct MockProvider {
        tables: Vec<&'static str>,
        connect_fails: bool,
        query_fails: bool,
        cursor_fails_after: Option<usize>,
        closes_fail: bool,
        log: EventLog,
    }

    impl MockProvider {
        fn new(tables: Vec<&'static str>) -> Self {
            Self {
                tables,
                connect_fails: false,
                query_fails: false,
                cursor_fails_after: None,
                closes_fail: false,
                log: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn events(&self) -> Vec<&'static str> {
            self.log.lock().unwrap().clone()
        }

        fn count(&self, event: &str) -> usize {
            self.events().iter().filter(|e| **e == event).count()
        }
    }

    impl ConnectionProvider for MockProvider {
        fn connect(&self, _descriptor: &ConnectionDescriptor) -> Result<Box<dyn MetaConnection>> {
            self.log.lock().unwrap().push("connect");
            if self.connect_fails {
                return Err(DataSourceError::connectivity("connection refused"));
            }
            Ok(Box::new(MockConnection {
                provider: self.clone(),
            }))
        }
    }

    struct MockConnection {
        provider: MockProvider,
    }

    impl MetaConnection for MockConnection {
        fn prepare(&mut self) -> Result<Box<dyn MetaStatement>> {
            self.provider.log.lock().unwrap().push("prepare");
            Ok(Box::new(MockStatement {
                provider: self.provider.clone(),
            }))
        }

        fn close(&mut self) -> Result<()> {
            self.provider.log.lock().unwrap().push("close connection");
            if self.provider.closes_fail {
                return Err(DataSourceError::query("close failed"));
            }
            Ok(())
        }
    }

    struct MockStatement {
        provider: MockProvider,
    }

    impl MetaStatement for MockStatement {
        fn tables(&mut self, _database: &str, _owner: &str) -> Result<Box<dyn TableCursor>> {
            self.provider.log.lock().unwrap().push("query");
            if self.provider.query_fails {
                return Err(DataSourceError::query("permission denied"));
            }
            Ok(Box::new(MockCursor {
                provider: self.provider.clone(),
                position: 0,
            }))
        }

        fn close(&mut self) -> Result<()> {
            self.provider.log.lock().unwrap().push("close statement");
            if self.provider.closes_fail {
                return Err(DataSourceError::query("close failed"));
            }
            Ok(())
        }
    }

    struct MockCursor {
        provider: MockProvider,
        position: usize,
    }

    impl TableCursor for MockCursor {
        fn next_name(&mut self) -> Result<Option<String>> {
            if let Some(limit) = self.provider.cursor_fails_after {
                if self.position >= limit {
                    return Err(DataSourceError::query("cursor lost"));
                }
            }
            let name = self.provider.tables.get(self.position).map(|s| s.to_string());
            self.position += 1;
            Ok(name)
        }

        fn close(&mut self) -> Result<()> {
            self.provider.log.lock().unwrap().push("close cursor");
            if self.provider.closes_fail {
                return Err(DataSourceError::query("close failed"));
            }
            Ok(())
        }
    }

    fn orders_scan() -> TableScan {
        TableScan::new(
            EngineKind::Mysql,
            "db.internal:3306",
            "reporting",
            "^orders.*$",
            "alice",
            "secret",
        )
    }

    // =========================================================================
    // Matching
    // =========================================================================

    #[test]
    fn test_full_match_filters_substring_hits() {
        let provider =
            MockProvider::new(vec!["orders", "orders_archive", "customer_orders", "events"]);
        let tables = list_tables(&provider, &orders_scan()).unwrap();
        assert_eq!(tables, vec!["orders", "orders_archive"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let provider = MockProvider::new(vec!["customers", "events"]);
        let tables = list_tables(&provider, &orders_scan()).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_unanchored_pattern_still_requires_full_match() {
        let provider = MockProvider::new(vec!["orders", "orders_archive", "old_orders"]);
        let mut scan = orders_scan();
        scan.pattern = "orders".to_string();
        let tables = list_tables(&provider, &scan).unwrap();
        assert_eq!(tables, vec!["orders"]);
    }

    #[test]
    fn test_matches_preserve_scan_order() {
        let provider = MockProvider::new(vec!["orders_z", "orders_a", "orders_m"]);
        let tables = list_tables(&provider, &orders_scan()).unwrap();
        assert_eq!(tables, vec!["orders_z", "orders_a", "orders_m"]);
    }

    // =========================================================================
    // Config-time failures happen before any I/O
    // =========================================================================

    #[test]
    fn test_bad_pattern_is_config_error_without_io() {
        let provider = MockProvider::new(vec!["orders"]);
        let mut scan = orders_scan();
        scan.pattern = "orders(".to_string();
        let err = list_tables(&provider, &scan).unwrap_err();
        assert!(matches!(err, DataSourceError::Config(_)));
        assert!(provider.events().is_empty());
    }

    #[test]
    fn test_empty_host_is_validation_error_without_io() {
        let provider = MockProvider::new(vec!["orders"]);
        let mut scan = orders_scan();
        scan.address = String::new();
        let err = list_tables(&provider, &scan).unwrap_err();
        match err {
            DataSourceError::Validation(errors) => {
                assert!(errors.fields().contains(&"host"));
            }
            other => panic!("expected validation error, got {other}"),
        }
        assert_eq!(provider.count("connect"), 0);
    }

    // =========================================================================
    // Release guarantees
    // =========================================================================

    #[test]
    fn test_success_releases_everything_in_reverse_order() {
        let provider = MockProvider::new(vec!["orders"]);
        list_tables(&provider, &orders_scan()).unwrap();
        assert_eq!(
            provider.events(),
            vec![
                "connect",
                "prepare",
                "query",
                "close cursor",
                "close statement",
                "close connection",
            ]
        );
    }

    #[test]
    fn test_mid_scan_failure_releases_each_resource_once() {
        let mut provider = MockProvider::new(vec!["orders", "orders_archive", "orders_old"]);
        provider.cursor_fails_after = Some(1);
        let err = list_tables(&provider, &orders_scan()).unwrap_err();
        assert!(matches!(err, DataSourceError::Query(_)));
        assert_eq!(provider.count("close cursor"), 1);
        assert_eq!(provider.count("close statement"), 1);
        assert_eq!(provider.count("close connection"), 1);
    }

    #[test]
    fn test_query_failure_releases_without_phantom_cursor_close() {
        let mut provider = MockProvider::new(vec!["orders"]);
        provider.query_fails = true;
        let err = list_tables(&provider, &orders_scan()).unwrap_err();
        assert!(matches!(err, DataSourceError::Query(_)));
        // The cursor was never acquired, so only statement and connection close.
        assert_eq!(provider.count("close cursor"), 0);
        assert_eq!(provider.count("close statement"), 1);
        assert_eq!(provider.count("close connection"), 1);
    }

    #[test]
    fn test_release_failures_never_mask_success() {
        let mut provider = MockProvider::new(vec!["orders"]);
        provider.closes_fail = true;
        let tables = list_tables(&provider, &orders_scan()).unwrap();
        assert_eq!(tables, vec!["orders"]);
        assert_eq!(provider.count("close cursor"), 1);
        assert_eq!(provider.count("close statement"), 1);
        assert_eq!(provider.count("close connection"), 1);
    }

    #[test]
    fn test_release_failures_never_mask_the_query_error() {
        let mut provider = MockProvider::new(vec!["orders"]);
        provider.cursor_fails_after = Some(0);
        provider.closes_fail = true;
        let err = list_tables(&provider, &orders_scan()).unwrap_err();
        assert!(matches!(err, DataSourceError::Query(ref m) if m.contains("cursor lost")));
    }

    #[test]
    fn test_connect_failure_propagates_unchanged() {
        let mut provider = MockProvider::new(vec!["orders"]);
        provider.connect_fails = true;
        let err = list_tables(&provider, &orders_scan()).unwrap_err();
        assert!(
            matches!(err, DataSourceError::Connectivity(ref m) if m == "connection refused")
        );
        assert_eq!(provider.count("close connection"), 0);
    }

    // =========================================================================
    // Misc
    // =========================================================================

    #[test]
    fn test_scan_debug_redacts_password() {
        let rendered = format!("{:?}", orders_scan());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret"));
    }
}
