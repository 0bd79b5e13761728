use crate::events::FrameInput;
use crate::world::World;
use radial::{
    ActivationResult, ButtonSet, Config, CursorState, Cue, Host, Menu, MenuKind, PlayerId, Sessions,
};
use serde::Serialize;
use std::collections::HashMap;

/// What the menu looked like at the end of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub player: PlayerId,
    pub state: String,
    pub menu: Option<MenuKind>,
    pub page: Option<usize>,
    pub selected: Option<usize>,
    pub angle: Option<f64>,
    pub blend: f64,
    pub remaining_delay_ms: Option<f64>,
    pub result: Option<ActivationResult>,
    pub cues: Vec<Cue>,
    pub movement_frozen: bool,
    pub suppressed: ButtonSet,
    pub toolbar_selection: Option<String>,
}

/// Drives one menu context and one world per player.
pub struct Simulation {
    config: Config,
    sessions: Sessions,
    worlds: HashMap<PlayerId, World>,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: Sessions::new(),
            worlds: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    pub fn world(&self, player: PlayerId) -> Option<&World> {
        self.worlds.get(&player)
    }

    pub fn world_mut(&mut self, player: PlayerId) -> Option<&mut World> {
        self.worlds.get_mut(&player)
    }

    pub fn frame(&mut self, frame: FrameInput) -> FrameReport {
        let page_size = self.config.inventory_page_size;
        let world = self
            .worlds
            .entry(frame.player)
            .or_insert_with(|| World::demo(page_size));
        let ctx = self.sessions.get_or_start(frame.player, &self.config);
        if ctx.menus().custom.pages().is_empty() {
            ctx.menus_mut().replace_custom(World::custom_menu());
        }

        world.begin_frame();
        ctx.menus_mut().inventory.refresh(world.inventory_items());
        ctx.pre_update(&frame.input, &self.config, world);
        let result = ctx.post_update(frame.elapsed_ms, &self.config, world);

        let cursor = ctx.cursor();
        let menu = cursor.active_menu();
        FrameReport {
            player: frame.player,
            state: match cursor.state() {
                CursorState::Idle => "idle",
                CursorState::Targeting => "targeting",
                CursorState::AwaitingRelease => "awaiting_release",
            }
            .to_string(),
            menu,
            page: menu.map(|kind| ctx.menus().get(kind).current_page_index()),
            selected: ctx.selected_item_index(),
            angle: cursor.target().map(|t| t.angle),
            blend: ctx.highlight_blend(),
            remaining_delay_ms: ctx.scheduler().remaining_delay_ms(),
            result,
            cues: world.take_cues(),
            movement_frozen: world.is_movement_frozen(),
            suppressed: world.suppressed(),
            toolbar_selection: world.selected_slot().map(|s| s.name.clone()),
        }
    }

    /// Swap in a new config. Every player is dropped back to idle.
    pub fn reload(&mut self, config: Config) {
        let rebuild = config.inventory_page_size != self.config.inventory_page_size;
        self.config = config;
        if rebuild {
            self.worlds
                .values_mut()
                .for_each(|world| world.set_page_size(self.config.inventory_page_size));
        }

        let players: Vec<PlayerId> = self.sessions.players().collect();
        for player in players {
            if let (Some(ctx), Some(world)) =
                (self.sessions.get_mut(player), self.worlds.get_mut(&player))
            {
                ctx.reset(world);
            }
        }
        if rebuild {
            self.sessions.reset_all(&self.config);
        }
        log::info!("Config reloaded for {} players", self.sessions.len());
    }

    /// A new save was loaded: fresh worlds and fresh menu contexts.
    pub fn load_session(&mut self) {
        self.worlds.clear();
        self.sessions.reset_all(&self.config);
        log::info!("Session loaded");
    }
}
