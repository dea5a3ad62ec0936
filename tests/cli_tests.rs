mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

use common::{setup_test_env, TestEnv};

fn cli(env: &TestEnv) -> Command {
    let mut cmd = Command::cargo_bin("gites_dashboard_cli").expect("binary");
    cmd.env("GITES_DASHBOARD_CLI_SCRIPT", "1")
        .env("GITES_DASHBOARD_HOME", env.home.path())
        .env("GITES_FEED", &env.feed)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn summary_excludes_home_exchange() {
    let env = setup_test_env();
    cli(&env)
        .write_stdin("period 2024\nsummary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Flux chargé"))
        .stdout(contains("Synthèse Année 2024"))
        .stdout(contains("Réservations  2"))
        .stdout(contains("CA brut       541,50 €"));
}

#[test]
fn gite_card_matches_the_edmond_scenario() {
    let env = setup_test_env();
    cli(&env)
        .write_stdin("period 2024\ngite edmond\n")
        .assert()
        .success()
        .stdout(contains("Edmond - Année 2024"))
        .stdout(contains("300,00 €"))
        .stdout(contains("Durée moy.     3,0 nuits"))
        .stdout(contains("Prix moy/nuit  100,00 €"))
        .stdout(contains("HomeExchange").not());
}

#[test]
fn urssaf_split_per_beneficiary() {
    let env = setup_test_env();
    cli(&env)
        .write_stdin("period 2023\nurssaf\n")
        .assert()
        .success()
        .stdout(contains("Soazig"))
        .stdout(contains("770,00 €"))
        .stdout(contains("46,20 €"));
}

#[test]
fn monthly_series_lists_every_month() {
    let env = setup_test_env();
    cli(&env)
        .write_stdin("monthly 2024\nyears\n")
        .assert()
        .success()
        .stdout(contains("CA mensuel 2024"))
        .stdout(contains("Janvier"))
        .stdout(contains("Décembre"))
        .stdout(contains("Années : 2024, 2023"));
}

#[test]
fn password_gate_blocks_reports_until_login() {
    let env = setup_test_env();
    cli(&env)
        .write_stdin("config set access_password tellthem\n")
        .assert()
        .success();

    cli(&env)
        .write_stdin("summary\nlogin wrong\nlogin tellthem\nperiod 2024\nsummary\n")
        .assert()
        .success()
        .stdout(contains("Accès refusé"))
        .stdout(contains("Mot de passe incorrect."))
        .stdout(contains("Accès autorisé."))
        .stdout(contains("Synthèse Année 2024"));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let env = setup_test_env();
    cli(&env)
        .write_stdin("sumary\n")
        .assert()
        .success()
        .stdout(contains("Commande inconnue `sumary`"))
        .stdout(contains("`summary`"));
}

#[test]
fn missing_feed_is_reported_not_fatal() {
    let env = setup_test_env();
    let mut cmd = cli(&env);
    cmd.env("GITES_FEED", env.home.path().join("absent.json"))
        .write_stdin("summary\nversion\n")
        .assert()
        .success()
        .stdout(contains("Chargement automatique impossible"))
        .stdout(contains("Aucune donnée chargée."))
        .stdout(contains("Gîtes dashboard"));
}

#[test]
fn locale_setting_drives_number_format() {
    let env = setup_test_env();
    cli(&env)
        .write_stdin("config set locale en-US\nperiod 2024\nsummary\n")
        .assert()
        .success()
        .stdout(contains("CA brut       541.50 €"));

    cli(&env)
        .write_stdin("period 2024\nsummary\n")
        .assert()
        .success()
        .stdout(contains("541.50 €"));
}

#[test]
fn summary_lists_configured_properties_in_order() {
    let env = setup_test_env();
    cli(&env)
        .write_stdin("period 2024\nsummary\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)Phonsine\s+0.*Gree.*Edmond.*Liberté").unwrap());
}
