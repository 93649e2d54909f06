//! Export/import bundle for whole-journal backup.
//!
//! The wire shape keeps the historical camelCase field names so bundles from
//! earlier app versions restore unchanged. Import is an additive merge at the
//! storage layer (records/tickets re-run `put`) and a full overwrite for the
//! flat entries.

use crate::model::bucket::BucketItem;
use crate::model::record::Record;
use crate::model::ticket::Ticket;
use crate::repo::kv_repo::{KvStore, KEY_BUCKET_LIST, KEY_CATEGORIES, KEY_CONFIG};
use crate::repo::record_repo::RecordRepository;
use crate::repo::ticket_repo::TicketRepository;
use crate::repo::RepoResult;
use log::info;
use serde::{Deserialize, Serialize};

/// Opaque third-party search credentials persisted for the settings view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub cx: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub bucket_list: Vec<BucketItem>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub config: SearchConfig,
    #[serde(default)]
    pub export_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub records: usize,
    pub tickets: usize,
}

/// Assembles a bundle from the full store and flat entries.
pub fn export_bundle(
    records: &impl RecordRepository,
    tickets: &impl TicketRepository,
    kv: &KvStore<'_>,
) -> RepoResult<Bundle> {
    let bundle = Bundle {
        records: records.get_all()?,
        tickets: tickets.get_all()?,
        bucket_list: kv.get_json(KEY_BUCKET_LIST)?.unwrap_or_default(),
        categories: kv.get_json(KEY_CATEGORIES)?.unwrap_or_default(),
        config: kv.get_json(KEY_CONFIG)?.unwrap_or_default(),
        export_date: crate::model::now_utc_rfc3339(),
    };
    info!(
        "event=backup_export module=backup status=ok records={} tickets={}",
        bundle.records.len(),
        bundle.tickets.len()
    );
    Ok(bundle)
}

/// Restores a bundle: re-runs `put` for every record and ticket and
/// overwrites the flat entries.
pub fn import_bundle(
    bundle: &Bundle,
    records: &impl RecordRepository,
    tickets: &impl TicketRepository,
    kv: &KvStore<'_>,
) -> RepoResult<ImportSummary> {
    for record in &bundle.records {
        records.put(record, None)?;
    }
    for ticket in &bundle.tickets {
        tickets.put(ticket)?;
    }

    kv.put_json(KEY_BUCKET_LIST, &bundle.bucket_list)?;
    kv.put_json(KEY_CATEGORIES, &bundle.categories)?;
    kv.put_json(KEY_CONFIG, &bundle.config)?;

    let summary = ImportSummary {
        records: bundle.records.len(),
        tickets: bundle.tickets.len(),
    };
    info!(
        "event=backup_import module=backup status=ok records={} tickets={}",
        summary.records, summary.tickets
    );
    Ok(summary)
}
