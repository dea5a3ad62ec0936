use std::path::PathBuf;

use assert_fs::{prelude::*, TempDir};

/// Feed shared by the CLI tests: Edmond has one Airbnb stay and one
/// HomeExchange swap in July 2024, Liberté one stay in July 2023.
pub const SAMPLE_FEED: &str = r#"{
    "Edmond": [
        ["Dupont", "10/07/2024", "13/07/2024", 7, 3, 2, 100, 300, "Airbnb", 6.6, 6],
        ["Troc", "20/07/2024", "22/07/2024", 7, 2, 1, 50, 100, "HomeExchange", 0, 0],
        ["Total", "", "", "", 5, "", "", 400, ""]
    ],
    "Gree": [
        ["Martin", "02/02/2024", "05/02/2024", 2, "3", "4", "80,5", "241,5", "Virement"]
    ],
    "Liberté": [
        ["Petit", "01/07/2023", "08/07/2023", 7, 7, 2, 110, 770, "Gites de France"]
    ]
}"#;

/// Isolated dashboard home with the sample feed written next to it.
pub struct TestEnv {
    pub home: TempDir,
    pub feed: PathBuf,
}

pub fn setup_test_env() -> TestEnv {
    let home = TempDir::new().expect("create temp dir");
    let feed = home.child("feed.json");
    feed.write_str(SAMPLE_FEED).expect("write feed");
    let feed = feed.path().to_path_buf();
    TestEnv { home, feed }
}
