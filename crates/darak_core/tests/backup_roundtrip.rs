use darak_core::backup::{export_bundle, import_bundle, Bundle, SearchConfig};
use darak_core::db::open_db_in_memory;
use darak_core::model::bucket::BucketItem;
use darak_core::{
    KvStore, Record, RecordRepository, SqliteRecordRepository, SqliteTicketRepository, Ticket,
    TicketRepository,
};

#[test]
fn export_captures_stores_and_flat_entries() {
    let conn = open_db_in_memory().unwrap();
    let records = SqliteRecordRepository::try_new(&conn).unwrap();
    let tickets = SqliteTicketRepository::try_new(&conn).unwrap();
    let kv = KvStore::try_new(&conn).unwrap();

    records
        .put(&Record::with_id(1, "2024-05-01", "movie"), None)
        .unwrap();
    tickets.put(&Ticket::with_id(2, "payload", 4.0)).unwrap();
    kv.put_json("darak_categories", &vec!["podcast".to_string()])
        .unwrap();

    let bundle = export_bundle(&records, &tickets, &kv).unwrap();
    assert_eq!(bundle.records.len(), 1);
    assert_eq!(bundle.tickets.len(), 1);
    assert_eq!(bundle.categories, vec!["podcast".to_string()]);
    assert!(bundle.bucket_list.is_empty());
}

#[test]
fn import_merges_stores_additively_and_overwrites_flat_entries() {
    let conn = open_db_in_memory().unwrap();
    let records = SqliteRecordRepository::try_new(&conn).unwrap();
    let tickets = SqliteTicketRepository::try_new(&conn).unwrap();
    let kv = KvStore::try_new(&conn).unwrap();

    // Existing state the bundle must not wipe out.
    records
        .put(&Record::with_id(99, "2024-01-01", "book"), None)
        .unwrap();
    kv.put_json("darak_categories", &vec!["stale".to_string()])
        .unwrap();

    let mut restored_record = Record::with_id(1, "2024-05-01", "movie");
    restored_record.owner_id = Some("alice".to_string());
    let bundle = Bundle {
        records: vec![restored_record],
        tickets: vec![Ticket::with_id(2, "payload", 0.0)],
        bucket_list: vec![BucketItem::new("Dune", "movie")],
        categories: vec!["podcast".to_string()],
        config: SearchConfig {
            api_key: "key".to_string(),
            cx: "cx".to_string(),
        },
        export_date: "2024-06-01T00:00:00Z".to_string(),
    };

    let summary = import_bundle(&bundle, &records, &tickets, &kv).unwrap();
    assert_eq!(summary.records, 1);
    assert_eq!(summary.tickets, 1);

    // Storage merged additively: both the old and the restored record exist.
    let ids: Vec<i64> = records.get_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![99, 1]);
    assert_eq!(tickets.get_all().unwrap().len(), 1);

    // Flat entries fully overwritten.
    let categories: Vec<String> = kv.get_json("darak_categories").unwrap().unwrap();
    assert_eq!(categories, vec!["podcast".to_string()]);
    let config: SearchConfig = kv.get_json("darak_config").unwrap().unwrap();
    assert_eq!(config.api_key, "key");
    let bucket: Vec<BucketItem> = kv.get_json("darak_bucketlist").unwrap().unwrap();
    assert_eq!(bucket[0].title, "Dune");
}

#[test]
fn bundle_wire_shape_uses_historical_field_names() {
    let bundle = Bundle {
        records: Vec::new(),
        tickets: Vec::new(),
        bucket_list: Vec::new(),
        categories: Vec::new(),
        config: SearchConfig::default(),
        export_date: "2024-06-01T00:00:00Z".to_string(),
    };

    let json = serde_json::to_string(&bundle).unwrap();
    assert!(json.contains("\"bucketList\""));
    assert!(json.contains("\"exportDate\""));
    assert!(json.contains("\"apiKey\""));

    let parsed: Bundle = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, bundle);
}

#[test]
fn import_then_export_round_trips_record_contents() {
    let conn = open_db_in_memory().unwrap();
    let records = SqliteRecordRepository::try_new(&conn).unwrap();
    let tickets = SqliteTicketRepository::try_new(&conn).unwrap();
    let kv = KvStore::try_new(&conn).unwrap();

    let mut record = Record::with_id(1, "2024-05-01", "movie");
    record.owner_id = Some("alice".to_string());
    record.title = Some("Oldboy".to_string());
    record
        .details
        .insert("director".to_string(), "Park Chan-wook".to_string());

    let bundle = Bundle {
        records: vec![record.clone()],
        tickets: Vec::new(),
        bucket_list: Vec::new(),
        categories: Vec::new(),
        config: SearchConfig::default(),
        export_date: "2024-06-01T00:00:00Z".to_string(),
    };
    import_bundle(&bundle, &records, &tickets, &kv).unwrap();

    let exported = export_bundle(&records, &tickets, &kv).unwrap();
    assert_eq!(exported.records, vec![record]);
}

#[test]
fn ordering_within_a_date_follows_record_ids() {
    // get_all orders by (date, id); the merge in import preserves that for
    // the next export.
    let conn = open_db_in_memory().unwrap();
    let records = SqliteRecordRepository::try_new(&conn).unwrap();

    records
        .put(&Record::with_id(20, "2024-05-01", "movie"), None)
        .unwrap();
    records
        .put(&Record::with_id(10, "2024-05-01", "book"), None)
        .unwrap();

    let ids: Vec<i64> = records.get_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![10, 20]);
}
