//! Typed view wrappers over committed catalog nodes
//!
//! Exercises the per-type accessor layer: native getters over derived
//! fields, reference getters resolved through the registry, and the
//! lifecycle guard that keeps derived reads behind the commit pass.

#[path = "testutils/mod.rs"]
mod testutils;

use catalite::typed::{Cluster, Column, Database, Index, Partition, Site, Table};
use catalite::CatalogError;

#[test]
fn test_partition_id() {
    let catalog = testutils::committed_catalog();
    let node = catalog.get("/cluster/db0/partition0").unwrap();
    let partition = Partition::wrap(node).unwrap();
    assert_eq!(partition.id().unwrap(), 7);
}

#[test]
fn test_wrap_checks_type_tag() {
    let catalog = testutils::committed_catalog();
    let node = catalog.get("/cluster/db0/partition0").unwrap();
    assert!(matches!(
        Table::wrap(node),
        Err(CatalogError::TypeMismatch(_))
    ));
}

#[test]
fn test_derived_reads_require_commit() {
    let catalog = testutils::populated_catalog();
    let node = catalog.get("/cluster/db0/partition0").unwrap();
    let partition = Partition::wrap(node).unwrap();
    assert!(matches!(
        partition.id(),
        Err(CatalogError::NotCommitted(_))
    ));
}

#[test]
fn test_cluster_and_database_views() {
    let catalog = testutils::committed_catalog();

    let cluster = Cluster::wrap(catalog.get("/cluster").unwrap()).unwrap();
    assert_eq!(cluster.leader_address().unwrap(), "10.0.0.1");
    assert_eq!(cluster.local_epoch().unwrap(), 1);
    assert_eq!(cluster.databases().unwrap().len(), 1);
    assert_eq!(cluster.sites().unwrap().len(), 1);

    let database = Database::wrap(catalog.get("/cluster/db0").unwrap()).unwrap();
    assert_eq!(database.schema().unwrap(), "create table t0;");
    assert_eq!(database.tables().unwrap().len(), 1);
    assert_eq!(database.partitions().unwrap().len(), 1);
}

#[test]
fn test_site_reference_getters() {
    let catalog = testutils::committed_catalog();
    let site = Site::wrap(catalog.get("/cluster/site0").unwrap()).unwrap();

    assert!(site.is_exec().unwrap());
    assert!(site.is_up().unwrap());
    assert_eq!(site.initiator_id().unwrap(), 3);
    assert_eq!(site.port().unwrap(), 21212);
    assert_eq!(site.messenger_port().unwrap(), 21213);

    let host_id = site.host(&catalog).unwrap().expect("host reference set");
    assert_eq!(catalog.node(host_id).unwrap().path(), "/cluster/host0");

    let partition_id = site
        .partition(&catalog)
        .unwrap()
        .expect("partition reference set");
    let partition = Partition::wrap(catalog.node(partition_id).unwrap()).unwrap();
    assert_eq!(partition.id().unwrap(), 7);
}

#[test]
fn test_table_column_and_index_views() {
    let catalog = testutils::committed_catalog();
    let table = Table::wrap(catalog.get("/cluster/db0/t0").unwrap()).unwrap();

    assert!(!table.is_replicated().unwrap());
    assert_eq!(table.estimated_tuple_count().unwrap(), 100_000);

    let partition_column = table
        .partition_column(&catalog)
        .unwrap()
        .expect("partition column set");
    let column = Column::wrap(catalog.node(partition_column).unwrap()).unwrap();
    assert_eq!(column.index().unwrap(), 0);
    assert_eq!(column.column_type().unwrap(), 5);
    assert!(!column.nullable().unwrap());

    // Columns iterate in name order
    let columns = table.columns().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(catalog.node(columns[0]).unwrap().name(), "c0");
    assert_eq!(catalog.node(columns[1]).unwrap().name(), "c1");

    let indexes = table.indexes().unwrap();
    let index = Index::wrap(catalog.node(indexes[0]).unwrap()).unwrap();
    assert!(index.unique().unwrap());
    assert_eq!(index.columns(&catalog).unwrap().len(), 2);
}

#[test]
fn test_scrubbed_reference_reads_as_unset() {
    let mut catalog = testutils::committed_catalog();
    catalog.delete_node("/cluster/host0").unwrap();

    let site = Site::wrap(catalog.get("/cluster/site0").unwrap()).unwrap();
    assert_eq!(site.host(&catalog).unwrap(), None);
    // The other reference is untouched
    assert!(site.partition(&catalog).unwrap().is_some());
}
