pub mod colors;
pub mod config;
pub mod lang;
pub mod monitor;
pub mod state;
pub mod toggle;

#[cfg(feature = "plugin")]
mod commands;
#[cfg(feature = "plugin")]
mod movement;
#[cfg(feature = "plugin")]
mod text;

#[cfg(feature = "plugin")]
pub use host::{METADATA, PUMPKIN_API_VERSION, plugin};

#[cfg(feature = "plugin")]
mod host {
    use std::sync::Arc;

    use pumpkin::plugin::events::player::player_move::PlayerMoveEvent;
    use pumpkin::plugin::{
        Context, EventPriority, PLUGIN_API_VERSION, Plugin, PluginFuture, PluginMetadata,
    };
    use pumpkin_util::permission::{Permission, PermissionDefault, PermissionLvl};

    use crate::commands::{self, PERMISSION_RELOAD};
    use crate::movement::LightLevelMoveHandler;
    use crate::state::{self, PluginState};

    const PERMISSION_COMMAND: &str = "lightleveldisplay:command";

    struct LightLevelDisplayPlugin;

    impl Plugin for LightLevelDisplayPlugin {
        fn on_load(&mut self, server: Arc<Context>) -> PluginFuture<'_, Result<(), String>> {
            Box::pin(async move {
                let data_dir = server.get_data_folder();
                let state = PluginState::load(data_dir).map_err(|e| e.to_string())?;
                let state = Arc::new(state);

                let permission_node = state::read(&state.config).permission_node.clone();

                let command_permission = Permission::new(
                    PERMISSION_COMMAND,
                    "Run /lightlevel.",
                    PermissionDefault::Allow,
                );
                server.register_permission(command_permission).await.ok();

                commands::register_use_permission(&server, &permission_node).await;

                let reload_permission = Permission::new(
                    PERMISSION_RELOAD,
                    "Reload LightLevelDisplay config and language files.",
                    PermissionDefault::Op(PermissionLvl::Two),
                );
                server.register_permission(reload_permission).await.ok();

                server
                    .register_command(
                        commands::lightlevel_command_tree(
                            Arc::clone(&state),
                            Arc::clone(&server),
                        ),
                        PERMISSION_COMMAND,
                    )
                    .await;

                server
                    .register_event::<PlayerMoveEvent, _>(
                        Arc::new(LightLevelMoveHandler::new(&state)),
                        EventPriority::Lowest,
                        false,
                    )
                    .await;

                log::info!("LightLevelDisplay enabled");
                Ok(())
            })
        }
    }

    #[unsafe(no_mangle)]
    pub static METADATA: PluginMetadata<'static> = PluginMetadata {
        name: "LightLevelDisplay",
        version: env!("CARGO_PKG_VERSION"),
        authors: env!("CARGO_PKG_AUTHORS"),
        description: env!("CARGO_PKG_DESCRIPTION"),
    };

    #[unsafe(no_mangle)]
    pub static PUMPKIN_API_VERSION: u32 = PLUGIN_API_VERSION;

    #[unsafe(no_mangle)]
    pub fn plugin() -> Box<dyn Plugin> {
        Box::new(LightLevelDisplayPlugin)
    }
}
