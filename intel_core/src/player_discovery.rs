//! Player-level discovery: what a player learns about the other players.
//!
//! The scan pass calls the injected [`PlayerInfoDiscoverer`] once per player
//! after all object discovery for the turn is done. The stock implementation
//! learns nothing.

use crate::player_intel::Player;

pub trait PlayerInfoDiscoverer: Send + Sync {
    fn discover_player_info(&self, player: &mut Player);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPlayerInfoDiscoverer;

impl PlayerInfoDiscoverer for NoopPlayerInfoDiscoverer {
    fn discover_player_info(&self, _player: &mut Player) {}
}

impl<F> PlayerInfoDiscoverer for F
where
    F: Fn(&mut Player) + Send + Sync,
{
    fn discover_player_info(&self, player: &mut Player) {
        self(player)
    }
}
