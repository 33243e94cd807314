//! # Hotbar Simulation
//!
//! Drives the plugin end to end without a game server:
//!
//! Load config → register commands → `/reload` → `/unload` → denied `/reload`
//!
//! Usage: `hotbar_sim [config.toml]`. Without an argument the config is
//! written to the system temp directory.

use std::path::PathBuf;

use hotbar_core::{
    AmmoType, GeneralPool, ItemStack, Magazine, PlayerInventory, QuickAccessSet, StandardHost,
    Weapon,
};
use hotbar_plugin::{ChatLog, Player, PermissionRegistry, PluginConfig, ReloadHotbar, PERMISSION_USE};

fn build_player(user_id: &str) -> Result<Player, Box<dyn std::error::Error>> {
    let mut belt = QuickAccessSet::new();
    belt.set(0, Weapon::new("W1", Magazine::new("rifle.ammo", 30).with_contents(10)))?;
    belt.set(1, ItemStack::new("bandage", 3))?;
    belt.set(3, Weapon::new("Revolver", Magazine::new("ammo.pistol", 8).with_contents(8)))?;
    belt.set(4, Weapon::without_magazine("Machete"))?;

    let pool = GeneralPool::from_stacks(
        24,
        [
            ItemStack::new("rifle.ammo", 5),
            ItemStack::new("wood", 500),
            ItemStack::new("rifle.ammo", 20),
        ],
    )?;

    Ok(Player::new(user_id, PlayerInventory::new(belt, pool)))
}

fn print_state(player: &Player, host: &StandardHost) {
    let rifle = AmmoType::new("rifle.ammo");
    let loaded = player
        .inventory
        .belt
        .as_ref()
        .map_or(0, |belt| belt.loaded_ammo(&rifle));
    let pooled = player
        .inventory
        .main
        .as_ref()
        .map_or(0, |pool| pool.count_matching(&rifle));
    println!(
        "  rifle.ammo: {loaded} loaded, {pooled} in inventory, {} on ground",
        host.ground_amount(&rifle)
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| std::env::temp_dir().join("ReloadHotbar.toml"), PathBuf::from);

    println!("=== Reload Hotbar Simulation ===");
    println!("config: {}", config_path.display());

    let config = PluginConfig::load(&config_path)?;
    let mut plugin = ReloadHotbar::new(config, PermissionRegistry::new());
    plugin.init()?;
    plugin.permissions_mut().grant("player-1", PERMISSION_USE)?;

    let reload_cmd = plugin.config().reload_chat_command.clone();
    let unload_cmd = plugin.config().unload_chat_command.clone();

    let mut player = build_player("player-1")?;
    let mut host = StandardHost::new();
    let mut chat = ChatLog::new();

    println!("\nbefore:");
    print_state(&player, &host);

    for token in [&reload_cmd, &unload_cmd] {
        let outcome = plugin.handle_chat_command(Some(&mut player), token, &[], &mut host, &mut chat);
        println!("\n/{token} -> {outcome:?}");
        print_state(&player, &host);
    }

    let mut stranger = build_player("player-2")?;
    plugin.handle_chat_command(Some(&mut stranger), &reload_cmd, &[], &mut host, &mut chat);

    println!("\n=== Chat ===");
    for (user_id, message) in chat.messages() {
        println!("[{user_id}] {message}");
    }

    Ok(())
}
