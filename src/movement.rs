use std::sync::{Arc, RwLock};

use pumpkin::entity::player::TitleMode;
use pumpkin::plugin::events::player::player_move::PlayerMoveEvent;
use pumpkin::plugin::{BoxFuture, Cancellable, EventHandler};
use pumpkin::server::Server;
use pumpkin::world::World;
use pumpkin_util::math::position::BlockPos;
use pumpkin_util::math::vector3::Vector3;

use crate::config::Config;
use crate::lang::Messages;
use crate::monitor::{self, BlockCoord, Channel, Movement};
use crate::state::{self, PluginState};
use crate::text;
use crate::toggle::DisplayToggles;

pub struct LightLevelMoveHandler {
    config: Arc<RwLock<Config>>,
    messages: Arc<RwLock<Messages>>,
    toggles: Arc<RwLock<DisplayToggles>>,
}

impl LightLevelMoveHandler {
    pub fn new(state: &PluginState) -> Self {
        Self {
            config: Arc::clone(&state.config),
            messages: Arc::clone(&state.messages),
            toggles: Arc::clone(&state.toggles),
        }
    }
}

fn block_of(position: &Vector3<f64>) -> BlockCoord {
    BlockCoord::containing(position.x, position.y, position.z)
}

/// Light level at `coord`, with sky light darkened for time and weather.
async fn light_level(world: &World, coord: BlockCoord) -> u8 {
    let pos = BlockPos(Vector3::new(coord.x, coord.y, coord.z));
    let block = world.level.get_block_light(&pos).await;
    let sky = world.level.get_sky_light(&pos).await;
    let time_of_day = world.level_time.lock().await.time_of_day;
    let (rain, thunder) = {
        let weather = world.weather.lock().await;
        (weather.rain_level, weather.thunder_level)
    };
    monitor::combined_light(block, sky, monitor::sky_darken(time_of_day, rain, thunder))
}

impl EventHandler<PlayerMoveEvent> for LightLevelMoveHandler {
    fn handle<'a>(
        &'a self,
        _server: &'a Arc<Server>,
        event: &'a PlayerMoveEvent,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let player = &event.player;
            let movement = Movement {
                player: player.gameprofile.id,
                from: block_of(&event.from),
                to: Some(block_of(&event.to)),
                cancelled: event.cancelled(),
            };
            let target = monitor::destination(&state::read(&self.toggles), &movement);
            let Some(target) = target else {
                return;
            };

            let world = player.world();
            let level = light_level(&world, target).await;

            let notice = {
                let config = state::read(&self.config);
                let messages = state::read(&self.messages);
                monitor::notice(&config, &messages, level)
            };
            let message = text::from_formatted(&notice.text);
            match notice.channel {
                Channel::ActionBar => player.show_title(&message, &TitleMode::ActionBar).await,
                Channel::Chat => player.send_system_message(&message).await,
            }
        })
    }
}
