//! End-to-end tests: config on disk through to transfer decisions.

use std::fs;

use tempfile::tempdir;
use transfer_router::command::{self, CommandOutcome};
use transfer_router::config::CONFIG_FILE;
use transfer_router::{Endpoint, TransferDecision, TransferRouter};

fn write_config(dir: &std::path::Path, body: &str) {
    fs::write(dir.join(CONFIG_FILE), body).unwrap();
}

#[test]
fn decides_mapped_then_passthrough_then_nothing() {
    let dir = tempdir().unwrap();
    write_config(
        dir.path(),
        "forward-original-target: true\n\
         transfer-mappings:\n\
         \x20\x20\"play.example:25565\": \"play.example:19132\"\n",
    );

    let router = TransferRouter::load(dir.path()).unwrap();

    assert_eq!(
        router.handle_transfer("play.example", 25565),
        TransferDecision::Mapped(Endpoint::new("play.example", 19132))
    );
    assert_eq!(
        router.handle_transfer("other.example", 25565),
        TransferDecision::Passthrough(Endpoint::new("other.example", 25565))
    );

    // Passthrough off: unmapped requests get the defined empty outcome
    write_config(
        dir.path(),
        "forward-original-target: false\ntransfer-mappings: {}\n",
    );
    router.reload().unwrap();
    assert_eq!(
        router.handle_transfer("play.example", 25565),
        TransferDecision::NoDestination
    );
}

#[test]
fn failed_reload_keeps_last_good_state() {
    let dir = tempdir().unwrap();
    write_config(
        dir.path(),
        "transfer-mappings:\n\x20\x20\"a.example\": \"b.example\"\n",
    );

    let router = TransferRouter::load(dir.path()).unwrap();
    let before = router.handle_transfer("a.example", 25565);
    assert_eq!(
        before,
        TransferDecision::Mapped(Endpoint::new("b.example", 19132))
    );

    write_config(dir.path(), "transfer-mappings: [broken\n");
    assert!(router.reload().is_err());

    // Old tables still serve
    assert_eq!(router.handle_transfer("a.example", 25565), before);
}

#[test]
fn transfer_command_resolves_shortcuts() {
    let dir = tempdir().unwrap();
    write_config(
        dir.path(),
        "add-transfer-command: true\n\
         transfer-shortcuts:\n\
         \x20\x20lobby: \"lobby.example:19132\"\n\
         \x20\x20broken: \"bad.example:badport\"\n",
    );

    let router = TransferRouter::load(dir.path()).unwrap();
    assert!(router.config().add_transfer_command);
    let mut names = router.shortcut_names();
    names.sort();
    assert_eq!(names, ["broken", "lobby"]);

    let args = vec!["lobby".to_string()];
    assert_eq!(
        command::execute(&router, &args, false, |_| {}),
        CommandOutcome::Transfer(Endpoint::new("lobby.example", 19132))
    );

    // Unknown shortcut without the transfer-anywhere permission
    let args = vec!["nowhere".to_string()];
    assert_eq!(
        command::execute(&router, &args, false, |_| {}),
        CommandOutcome::Rejected {
            message_key: "commands.transfer.not_found"
        }
    );

    // With the permission the same argument parses as host[:port]
    let args = vec!["anywhere.example:19132".to_string()];
    assert_eq!(
        command::execute(&router, &args, true, |_| {}),
        CommandOutcome::Transfer(Endpoint::new("anywhere.example", 19132))
    );

    // A shortcut that parsed with a fallback port still transfers; the
    // bad port fell back during table build
    let args = vec!["broken".to_string()];
    assert_eq!(
        command::execute(&router, &args, false, |_| {}),
        CommandOutcome::Transfer(Endpoint::new("bad.example", 19132))
    );
}

#[test]
fn transfer_command_respects_feature_flag() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "add-transfer-command: false\n");

    let router = TransferRouter::load(dir.path()).unwrap();
    assert_eq!(
        command::execute(&router, &["lobby".to_string()], true, |_| {}),
        CommandOutcome::Rejected {
            message_key: "commands.not_enabled"
        }
    );
}

#[test]
fn menu_request_requires_some_way_to_transfer() {
    let dir = tempdir().unwrap();
    write_config(
        dir.path(),
        "add-transfer-command: true\ntransfer-shortcuts: {}\n",
    );

    let router = TransferRouter::load(dir.path()).unwrap();
    assert_eq!(
        command::execute(&router, &[], false, |_| {}),
        CommandOutcome::Rejected {
            message_key: "commands.transfer.none_available"
        }
    );
    assert_eq!(
        command::execute(&router, &[], true, |_| {}),
        CommandOutcome::OpenMenu
    );
}

#[test]
fn locale_messages_resolve_through_the_router() {
    let dir = tempdir().unwrap();
    let router = TransferRouter::load(dir.path()).unwrap();

    assert_eq!(
        router.locale_string("menu.transfer.title"),
        "Transfer to a server"
    );
    // Unknown locales fall back to the default table
    assert_eq!(
        router.locale_string_for("fr_FR", "menu.transfer.title"),
        "Transfer to a server"
    );
    assert!(dir.path().join("translations/en_US.properties").exists());
}
