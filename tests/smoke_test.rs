mod common;

use gites_config::ConfigManager;
use gites_core::{load_dataset, OccupancyService, FixedClock, StatsService};
use gites_dashboard::init;
use gites_domain::PeriodSelector;
use gites_feed_json::JsonFileFeed;
use chrono::NaiveDate;

#[test]
fn feed_to_report_smoke() {
    init();
    let env = common::setup_test_env();

    let manager = ConfigManager::with_base_dir(env.home.path().to_path_buf()).expect("manager");
    let config = manager.load().expect("default config");
    let dataset = load_dataset(&JsonFileFeed::new(&env.feed)).expect("load feed");

    let global = StatsService::global_stats(&dataset, PeriodSelector::year(2024), &config.rules);
    assert_eq!(global.reservation_count, 2);
    assert_eq!(global.total_revenue, 541.5);

    let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    let occupancy = OccupancyService::occupancy_ratio(
        dataset.records("Liberté"),
        PeriodSelector::month(2023, 7),
        &config.rules,
        &clock,
    );
    assert_eq!(occupancy, 7.0 / 31.0);
}
