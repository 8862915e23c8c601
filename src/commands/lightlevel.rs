use std::sync::Arc;

use pumpkin::command::tree::builder::literal;
use pumpkin::command::{
    CommandExecutor, CommandResult, CommandSender, args::ConsumedArgs, tree::CommandTree,
};
use pumpkin::plugin::Context;
use pumpkin::server::Server;
use pumpkin_util::permission::{Permission, PermissionDefault};

use crate::lang::MessageKey;
use crate::state::{self, PluginState};
use crate::text;
use crate::toggle::{self, Invoker};

pub const PERMISSION_RELOAD: &str = "lightleveldisplay:reload";

/// Registers the configured toggle permission node, allowed by default.
pub async fn register_use_permission(context: &Context, node: &str) {
    let permission = Permission::new(
        node,
        "Toggle the light level display.",
        PermissionDefault::Allow,
    );
    if context.register_permission(permission).await.is_err() {
        log::warn!("Could not register permission node {node}");
    }
}

struct ToggleExecutor {
    state: Arc<PluginState>,
}

impl CommandExecutor for ToggleExecutor {
    fn execute<'a>(
        &'a self,
        sender: &'a CommandSender,
        _server: &'a Server,
        _args: &'a ConsumedArgs<'a>,
    ) -> CommandResult<'a> {
        Box::pin(async move {
            let invoker = match sender.as_player() {
                None => Invoker::Console,
                Some(player) => {
                    let (check, node) = {
                        let config = state::read(&self.state.config);
                        (config.check_permission, config.permission_node.clone())
                    };
                    let permitted = !check || player.has_permission(&node).await;
                    Invoker::Player {
                        id: player.gameprofile.id,
                        permitted,
                    }
                }
            };

            let reply = {
                let mut toggles = state::write(&self.state.toggles);
                toggle::toggle_display(&mut toggles, invoker)
            };
            let template = state::read(&self.state.messages)
                .get(reply.message_key())
                .to_string();
            sender.send_message(text::from_template(&template)).await;
            Ok(())
        })
    }
}

struct ReloadExecutor {
    state: Arc<PluginState>,
    context: Arc<Context>,
}

impl CommandExecutor for ReloadExecutor {
    fn execute<'a>(
        &'a self,
        sender: &'a CommandSender,
        _server: &'a Server,
        _args: &'a ConsumedArgs<'a>,
    ) -> CommandResult<'a> {
        Box::pin(async move {
            if let Some(player) = sender.as_player() {
                if !player.has_permission(PERMISSION_RELOAD).await {
                    let template = state::read(&self.state.messages)
                        .get(MessageKey::NoPermission)
                        .to_string();
                    sender.send_message(text::from_template(&template)).await;
                    return Ok(());
                }
            }

            let template = match self.state.reload() {
                Ok(changed_node) => {
                    if let Some(node) = changed_node {
                        register_use_permission(&self.context, &node).await;
                    }
                    log::info!("LightLevelDisplay configuration reloaded");
                    state::read(&self.state.messages)
                        .get(MessageKey::ConfigReloaded)
                        .to_string()
                }
                Err(err) => {
                    log::warn!("LightLevelDisplay reload failed: {err}");
                    state::read(&self.state.messages)
                        .get(MessageKey::ReloadFailed)
                        .replace("{ERROR}", &err.to_string())
                }
            };
            sender.send_message(text::from_template(&template)).await;
            Ok(())
        })
    }
}

pub fn lightlevel_command_tree(state: Arc<PluginState>, context: Arc<Context>) -> CommandTree {
    CommandTree::new(["lightlevel"], "Toggle the light level display.")
        .execute(ToggleExecutor {
            state: Arc::clone(&state),
        })
        .then(literal("reload").execute(ReloadExecutor { state, context }))
}
