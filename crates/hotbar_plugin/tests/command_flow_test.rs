//! Integration tests for the chat command flow.

use hotbar_core::{
    AmmoType, GeneralPool, ItemStack, Magazine, PlayerInventory, QuickAccessSet, StandardHost,
    Weapon,
};
use hotbar_plugin::{
    ChatLog, CommandOutcome, MessageKey, PermissionRegistry, Player, PluginConfig, ReloadHotbar,
    PERMISSION_USE,
};

const USER: &str = "76561198000000001";

fn setup(config: PluginConfig) -> ReloadHotbar<PermissionRegistry> {
    let mut plugin = ReloadHotbar::new(config, PermissionRegistry::new());
    plugin.init().unwrap();
    plugin.permissions_mut().grant(USER, PERMISSION_USE).unwrap();
    plugin
}

fn armed_player() -> Player {
    let mut belt = QuickAccessSet::new();
    belt.set(0, Weapon::new("Assault Rifle", Magazine::new("ammo.rifle", 30).with_contents(10)))
        .unwrap();
    belt.set(2, Weapon::new("Revolver", Magazine::new("ammo.pistol", 8).with_contents(2)))
        .unwrap();
    let pool = GeneralPool::from_stacks(
        24,
        [
            ItemStack::new("ammo.rifle", 5),
            ItemStack::new("ammo.pistol", 100),
            ItemStack::new("ammo.rifle", 20),
        ],
    )
    .unwrap();
    Player::new(USER, PlayerInventory::new(belt, pool))
}

#[test]
fn test_reload_then_unload() {
    let plugin = setup(PluginConfig::default());
    let mut player = armed_player();
    let mut host = StandardHost::new();
    let mut chat = ChatLog::new();

    let reloaded = plugin.handle_chat_command(Some(&mut player), "reload", &[], &mut host, &mut chat);
    let CommandOutcome::Reloaded(report) = reloaded else {
        panic!("expected reload, got {reloaded:?}");
    };
    assert_eq!(report.weapons_reloaded(), 2);
    assert_eq!(report.total_ammo_used(), 26);

    let unloaded = plugin.handle_chat_command(Some(&mut player), "unload", &[], &mut host, &mut chat);
    let CommandOutcome::Unloaded(report) = unloaded else {
        panic!("expected unload, got {unloaded:?}");
    };
    assert_eq!(report.total_ammo_unloaded(), 38);

    assert_eq!(
        chat.messages_for(USER),
        vec![
            "Reloading your hotbar weapons...",
            "Reloaded 2 weapons using a total of 26 ammo:\n\
             - Assault Rifle (ammo.rifle) +20\n\
             - Revolver (ammo.pistol) +6",
            "Unloading your hotbar weapons...",
            "Unloaded 2 weapons, removing a total of 38 ammo:\n\
             - Assault Rifle: -30\n\
             - Revolver: -8",
        ]
    );

    let pool = player.inventory.main.as_ref().unwrap();
    assert_eq!(pool.count_matching(&AmmoType::new("ammo.rifle")), 35);
    assert_eq!(pool.count_matching(&AmmoType::new("ammo.pistol")), 102);
}

#[test]
fn test_nothing_to_do_sends_no_weapon() {
    let plugin = setup(PluginConfig::default());
    let mut player = Player::new(USER, PlayerInventory::new(QuickAccessSet::new(), GeneralPool::new()));
    let mut host = StandardHost::new();
    let mut chat = ChatLog::new();

    assert_eq!(
        plugin.handle_chat_command(Some(&mut player), "reload", &[], &mut host, &mut chat),
        CommandOutcome::NoWeapon
    );
    assert_eq!(
        plugin.handle_chat_command(Some(&mut player), "unload", &[], &mut host, &mut chat),
        CommandOutcome::NoWeapon
    );

    let messages = chat.messages_for(USER);
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[1], MessageKey::NoWeapon.english());
    assert_eq!(messages[3], MessageKey::NoWeapon.english());
    assert!(!messages.contains(&MessageKey::NoAmmo.english()));
}

#[test]
fn test_full_belt_reload_changes_nothing() {
    let plugin = setup(PluginConfig::default());
    let mut belt = QuickAccessSet::new();
    belt.set(0, Weapon::new("Assault Rifle", Magazine::new("ammo.rifle", 30).with_contents(30)))
        .unwrap();
    belt.set(1, Weapon::new("Revolver", Magazine::new("ammo.pistol", 8).with_contents(8)))
        .unwrap();
    let pool = GeneralPool::from_stacks(
        24,
        [ItemStack::new("ammo.rifle", 40), ItemStack::new("ammo.pistol", 16)],
    )
    .unwrap();
    let mut player = Player::new(USER, PlayerInventory::new(belt, pool));
    let before = player.clone();
    let mut host = StandardHost::new();
    let mut chat = ChatLog::new();

    let outcome = plugin.handle_chat_command(Some(&mut player), "reload", &[], &mut host, &mut chat);

    assert_eq!(outcome, CommandOutcome::NoWeapon);
    assert_eq!(
        chat.messages_for(USER),
        vec!["Reloading your hotbar weapons...", MessageKey::NoWeapon.english()]
    );
    assert_eq!(player, before);
    assert!(host.weapon_updates().is_empty());
}

#[test]
fn test_no_matching_ammo_reports_no_weapon() {
    let plugin = setup(PluginConfig::default());
    let mut belt = QuickAccessSet::new();
    belt.set(0, Weapon::new("Pump Shotgun", Magazine::new("ammo.shotgun", 6)))
        .unwrap();
    let pool = GeneralPool::from_stacks(24, [ItemStack::new("ammo.rifle", 50)]).unwrap();
    let mut player = Player::new(USER, PlayerInventory::new(belt, pool));
    let mut host = StandardHost::new();
    let mut chat = ChatLog::new();

    let outcome = plugin.handle_chat_command(Some(&mut player), "reload", &[], &mut host, &mut chat);

    assert_eq!(outcome, CommandOutcome::NoWeapon);
    assert_eq!(
        chat.messages_for(USER).last().copied(),
        Some(MessageKey::NoWeapon.english())
    );
}

#[test]
fn test_missing_belt_sends_no_weapon() {
    let plugin = setup(PluginConfig::default());
    let mut player = Player::new(
        USER,
        PlayerInventory {
            belt: None,
            main: Some(GeneralPool::new()),
        },
    );
    let mut host = StandardHost::new();
    let mut chat = ChatLog::new();

    let outcome = plugin.handle_chat_command(Some(&mut player), "unload", &[], &mut host, &mut chat);

    assert_eq!(outcome, CommandOutcome::NoWeapon);
    assert_eq!(
        chat.messages_for(USER),
        vec!["Unloading your hotbar weapons...", MessageKey::NoWeapon.english()]
    );
    assert_eq!(host.belt_updates(), 0);
}

#[test]
fn test_custom_command_tokens() {
    let config = PluginConfig::from_toml_str(
        r#"
        Version = "1.0.0"
        "Reload Chat Command" = "rl"
        "Unload Chat Command" = "ul"
        "#,
    )
    .unwrap();
    let plugin = setup(config);
    let mut player = armed_player();
    let mut host = StandardHost::new();
    let mut chat = ChatLog::new();

    assert_eq!(
        plugin.handle_chat_command(Some(&mut player), "reload", &[], &mut host, &mut chat),
        CommandOutcome::UnknownCommand
    );
    assert!(chat.messages().is_empty());

    let outcome = plugin.handle_chat_command(Some(&mut player), "RL", &["ignored"], &mut host, &mut chat);
    assert!(matches!(outcome, CommandOutcome::Reloaded(_)));
}

#[test]
fn test_translated_messages() {
    let mut plugin = setup(PluginConfig::default());
    plugin
        .catalog_mut()
        .register("de", [(MessageKey::Unloading, "Entlade Waffen...".to_string())]);
    let mut player = armed_player().with_language("de");
    let mut host = StandardHost::new();
    let mut chat = ChatLog::new();

    plugin.handle_chat_command(Some(&mut player), "unload", &[], &mut host, &mut chat);

    let messages = chat.messages_for(USER);
    assert_eq!(messages[0], "Entlade Waffen...");
    assert!(messages[1].starts_with("Unloaded 2 weapons"));
}
