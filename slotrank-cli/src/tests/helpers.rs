//! Test helpers for writing CLI datasets to a temporary workspace.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Search date used by every fixture dataset.
pub(super) const SEARCH_DATE: &str = "2024-05-01";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Temporary directory holding a dataset and optional scoring config.
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) dataset: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let dataset = root.join("dataset.json");
        Self {
            _tmp: tmp,
            root,
            dataset,
        }
    }

    pub(super) fn write_dataset(&self, dataset: &Value) {
        let payload = serde_json::to_string_pretty(dataset).expect("serialize dataset");
        write_utf8(&self.dataset, payload.as_bytes());
    }

    pub(super) fn write_scoring_config(&self, config: &Value) -> Utf8PathBuf {
        let path = self.root.join("scoring.json");
        let payload = serde_json::to_string_pretty(config).expect("serialize scoring config");
        write_utf8(&path, payload.as_bytes());
        path
    }
}

/// A spa lover at the origin, a nearby spa, a distant gym and a fully
/// booked pool.
pub(super) fn sample_dataset() -> Value {
    json!({
        "users": [
            {
                "id": "user-1",
                "preferences": [{"category": "spa", "weight": 0.8}],
                "location": [0.0, 0.0],
                "bookingHistory": []
            }
        ],
        "items": [
            {
                "id": "gym-b",
                "category": "gym",
                "rating": 3.0,
                "totalBookings": 100,
                "location": [10.0, 10.0],
                "availability": [{
                    "date": "2024-05-01T00:00:00.000Z",
                    "slots": [
                        {"time": "09:00", "isBooked": false},
                        {"time": "10:00", "isBooked": true}
                    ]
                }]
            },
            {
                "id": "spa-a",
                "category": "spa",
                "rating": 5.0,
                "totalBookings": 500,
                "location": [0.0, 0.0],
                "availability": [{
                    "date": SEARCH_DATE,
                    "slots": [
                        {"time": "09:00", "isBooked": false},
                        {"time": "10:00", "isBooked": false},
                        {"time": "11:00", "isBooked": false},
                        {"time": "12:00", "isBooked": true}
                    ]
                }]
            },
            {
                "id": "pool-c",
                "category": "pool",
                "rating": 4.0,
                "totalBookings": 50,
                "location": [0.01, 0.01],
                "availability": [{
                    "date": SEARCH_DATE,
                    "slots": [{"time": "09:00", "isBooked": true}]
                }]
            }
        ]
    })
}

/// Arguments ranking the sample dataset for `user-1` on [`SEARCH_DATE`].
pub(super) fn rank_args(workspace: &Workspace) -> super::RankArgs {
    super::RankArgs {
        dataset: Some(workspace.dataset.clone()),
        user_id: Some("user-1".to_owned()),
        date: Some(SEARCH_DATE.to_owned()),
        ..super::RankArgs::default()
    }
}

/// Identifiers of the results in a printed rank response.
pub(super) fn result_ids(stdout: &[u8]) -> Vec<String> {
    let response: Value = serde_json::from_slice(stdout).expect("stdout should be JSON");
    response["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|entry| entry["item"]["id"].as_str().expect("item id").to_owned())
        .collect()
}
