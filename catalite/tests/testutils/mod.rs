//! Shared fixtures for catalog integration tests

use catalite::schema::builtin;
use catalite::{Catalog, CatalogValue};

/// Init logging once so failing tests show catalog debug output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Empty catalog over the built-in database schema
pub fn empty_catalog() -> Catalog {
    init_logging();
    Catalog::new(builtin::database_schema()).expect("builtin schema is valid")
}

/// A small populated cluster tree, not yet committed:
///
/// - `/cluster` with `/cluster/host0`, `/cluster/site0`
/// - `/cluster/db0` with table `t0` (columns `c0`, `c1`, index `idx0`)
///   and `partition0` (id = 7)
/// - `site0.host` → host0, `site0.partition` → partition0
/// - `t0.partitioncolumn` → c0, `idx0.columns` → [c0, c1]
pub fn populated_catalog() -> Catalog {
    let mut catalog = empty_catalog();

    catalog
        .create_node("/cluster", "Cluster", "cluster")
        .expect("create cluster");
    catalog
        .add_child("/cluster", "hosts", "host0")
        .expect("create host");
    catalog
        .add_child("/cluster", "sites", "site0")
        .expect("create site");
    catalog
        .create_node("/cluster/db0", "Database", "db0")
        .expect("create database");
    catalog
        .create_node("/cluster/db0/t0", "Table", "t0")
        .expect("create table");
    catalog
        .add_child("/cluster/db0/t0", "columns", "c0")
        .expect("create column");
    catalog
        .add_child("/cluster/db0/t0", "columns", "c1")
        .expect("create column");
    catalog
        .add_child("/cluster/db0/t0", "indexes", "idx0")
        .expect("create index");
    catalog
        .create_node("/cluster/db0/partition0", "Partition", "partition0")
        .expect("create partition");

    let sets = [
        ("/cluster", "leaderaddress", CatalogValue::String("10.0.0.1".into())),
        ("/cluster", "localepoch", CatalogValue::Integer(1)),
        ("/cluster/host0", "ipaddr", CatalogValue::String("10.0.0.2".into())),
        ("/cluster/site0", "isexec", CatalogValue::Boolean(true)),
        ("/cluster/site0", "host", CatalogValue::Reference(Some("/cluster/host0".into()))),
        (
            "/cluster/site0",
            "partition",
            CatalogValue::Reference(Some("/cluster/db0/partition0".into())),
        ),
        ("/cluster/site0", "initiatorid", CatalogValue::Integer(3)),
        ("/cluster/site0", "isUp", CatalogValue::Boolean(true)),
        ("/cluster/site0", "port", CatalogValue::Integer(21212)),
        ("/cluster/site0", "messenger_port", CatalogValue::Integer(21213)),
        ("/cluster/db0", "schema", CatalogValue::String("create table t0;".into())),
        ("/cluster/db0/t0", "isreplicated", CatalogValue::Boolean(false)),
        (
            "/cluster/db0/t0",
            "partitioncolumn",
            CatalogValue::Reference(Some("/cluster/db0/t0/c0".into())),
        ),
        ("/cluster/db0/t0", "estimatedtuplecount", CatalogValue::Integer(100_000)),
        ("/cluster/db0/t0/c0", "index", CatalogValue::Integer(0)),
        ("/cluster/db0/t0/c0", "type", CatalogValue::Integer(5)),
        ("/cluster/db0/t0/c1", "index", CatalogValue::Integer(1)),
        ("/cluster/db0/t0/c1", "type", CatalogValue::Integer(9)),
        ("/cluster/db0/t0/idx0", "unique", CatalogValue::Boolean(true)),
        (
            "/cluster/db0/t0/idx0",
            "columns",
            CatalogValue::ReferenceList(vec![
                "/cluster/db0/t0/c0".into(),
                "/cluster/db0/t0/c1".into(),
            ]),
        ),
        ("/cluster/db0/partition0", "id", CatalogValue::Integer(7)),
    ];
    for (path, attr, value) in sets {
        catalog
            .set_attribute(path, attr, value)
            .unwrap_or_else(|e| panic!("set {} on {}: {}", attr, path, e));
    }

    catalog
}

/// Populated tree after the full commit pass
pub fn committed_catalog() -> Catalog {
    let mut catalog = populated_catalog();
    catalog.commit_all().expect("commit pass");
    catalog
}
