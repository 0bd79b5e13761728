//! Opens and closes menus from trigger input and maps the stick onto an item.

pub mod target;

pub use target::CursorTarget;

use crate::config::{ActivationMethod, Config};
use crate::host::Host;
use crate::input::{Button, InputSnapshot, Stick, Trigger};
use crate::item::ItemActivationType;
use crate::menu::{MenuKind, MenuSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// No menu shown.
    #[default]
    Idle,
    /// Menu shown, stick mapped onto an item.
    Targeting,
    /// Trigger let go under [`ActivationMethod::TriggerRelease`]: the target is
    /// frozen for the activation request and the menu closes this frame.
    AwaitingRelease,
}

/// The one host flag restored when the menu closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreMenuState {
    pub movement_frozen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationRequest {
    pub kind: ItemActivationType,
    /// Button that asked for the activation, if any; a held button keeps
    /// long-running activations going.
    pub source: Option<Button>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorUpdate {
    /// A menu went from hidden to shown this frame.
    pub opened: bool,
    pub activation: Option<ActivationRequest>,
}

#[derive(Debug, Default)]
pub struct Cursor {
    state: CursorState,
    active_menu: Option<MenuKind>,
    active_trigger: Option<Trigger>,
    target: Option<CursorTarget>,
    pre_menu: Option<PreMenuState>,
    activation_suppressed: bool,
    was_menu_changed: bool,
    was_target_changed: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != CursorState::Idle
    }

    pub fn active_menu(&self) -> Option<MenuKind> {
        self.active_menu
    }

    pub fn active_trigger(&self) -> Option<Trigger> {
        self.active_trigger
    }

    pub fn target(&self) -> Option<CursorTarget> {
        self.target
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.target.map(|t| t.selected_index)
    }

    pub fn pre_menu_state(&self) -> Option<PreMenuState> {
        self.pre_menu
    }

    pub fn is_activation_suppressed(&self) -> bool {
        self.activation_suppressed
    }

    /// True only on the frame a menu opened, closed or changed page.
    pub fn was_menu_changed(&self) -> bool {
        self.was_menu_changed
    }

    /// True only on the frame the selected index changed.
    pub fn was_target_changed(&self) -> bool {
        self.was_target_changed
    }

    /// Runs once per frame before the host consumes its own input.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        config: &Config,
        menus: &mut MenuSet,
        host: &mut dyn Host,
    ) -> CursorUpdate {
        self.was_menu_changed = false;
        self.was_target_changed = false;

        if !host.is_player_free() {
            if self.is_open() {
                self.close(host);
            }
            return CursorUpdate::default();
        }

        // Analog trigger values race the host's own edge detection for the
        // same physical buttons.
        host.suppress(config.inventory_menu_trigger.button());
        host.suppress(config.custom_menu_trigger.button());

        match self.state {
            CursorState::Idle => self.update_idle(input, config, menus, host),
            CursorState::Targeting => self.update_targeting(input, config, menus, host),
            CursorState::AwaitingRelease => {
                self.close(host);
                CursorUpdate::default()
            }
        }
    }

    fn update_idle(
        &mut self,
        input: &InputSnapshot,
        config: &Config,
        menus: &mut MenuSet,
        host: &mut dyn Host,
    ) -> CursorUpdate {
        let Some((trigger, kind)) = Self::pressed_trigger(input, config) else {
            self.activation_suppressed = false;
            return CursorUpdate::default();
        };
        if self.activation_suppressed {
            return CursorUpdate::default();
        }

        self.open(trigger, kind, menus, host);
        self.suppress_menu_buttons(config, host);
        self.refresh_target(input, config, menus);
        CursorUpdate {
            opened: true,
            activation: None,
        }
    }

    fn update_targeting(
        &mut self,
        input: &InputSnapshot,
        config: &Config,
        menus: &mut MenuSet,
        host: &mut dyn Host,
    ) -> CursorUpdate {
        let (Some(trigger), Some(kind)) = (self.active_trigger, self.active_menu) else {
            self.close(host);
            return CursorUpdate::default();
        };

        if input.trigger(trigger) <= config.trigger_deadzone {
            if config.activation_method == ActivationMethod::TriggerRelease
                && !self.activation_suppressed
                && self.target.is_some()
            {
                self.state = CursorState::AwaitingRelease;
                return CursorUpdate {
                    opened: false,
                    activation: Some(ActivationRequest {
                        kind: config.trigger_release_action,
                        source: None,
                    }),
                };
            }
            self.close(host);
            self.activation_suppressed = false;
            return CursorUpdate::default();
        }

        self.suppress_menu_buttons(config, host);

        let menu = menus.get_mut(kind);
        let paged = (input.is_pressed(config.previous_page_button) && menu.previous_page())
            || (input.is_pressed(config.next_page_button) && menu.next_page());
        if paged {
            self.was_menu_changed = true;
        }

        self.refresh_target(input, config, menus);
        CursorUpdate {
            opened: false,
            activation: self.activation_input(input, config),
        }
    }

    fn pressed_trigger(input: &InputSnapshot, config: &Config) -> Option<(Trigger, MenuKind)> {
        [
            (config.inventory_menu_trigger, MenuKind::Inventory),
            (config.custom_menu_trigger, MenuKind::Custom),
        ]
        .into_iter()
        .find(|&(trigger, _)| input.trigger(trigger) > config.trigger_deadzone)
    }

    fn active_stick(&self, config: &Config) -> Option<Stick> {
        self.active_trigger
            .map(|trigger| config.thumbstick_preference.resolve(trigger))
    }

    fn primary_button(&self, config: &Config) -> Option<Button> {
        match config.activation_method {
            ActivationMethod::ActionBind => Some(config.primary_action_button),
            ActivationMethod::ThumbStickPress => self.active_stick(config).map(Stick::button),
            ActivationMethod::TriggerRelease => None,
        }
    }

    fn suppress_menu_buttons(&self, config: &Config, host: &mut dyn Host) {
        let buttons = [
            self.primary_button(config),
            Some(config.secondary_action_button),
            Some(config.previous_page_button),
            Some(config.next_page_button),
        ];
        buttons.into_iter().flatten().for_each(|b| host.suppress(b));
    }

    fn activation_input(&self, input: &InputSnapshot, config: &Config) -> Option<ActivationRequest> {
        if self.activation_suppressed || self.target.is_none() {
            return None;
        }
        if let Some(button) = self.primary_button(config)
            && input.is_pressed(button)
        {
            return Some(ActivationRequest {
                kind: ItemActivationType::Primary,
                source: Some(button),
            });
        }
        input
            .is_pressed(config.secondary_action_button)
            .then_some(ActivationRequest {
                kind: ItemActivationType::Secondary,
                source: Some(config.secondary_action_button),
            })
    }

    fn refresh_target(&mut self, input: &InputSnapshot, config: &Config, menus: &MenuSet) {
        let (Some(kind), Some(stick)) = (self.active_menu, self.active_stick(config)) else {
            return;
        };
        let count = menus.get(kind).item_count();
        let next = target::target_from_stick(input.stick(stick), config.thumbstick_deadzone, count);
        if next.map(|t| t.selected_index) != self.selected_index() {
            self.was_target_changed = true;
        }
        self.target = next;
    }

    fn open(&mut self, trigger: Trigger, kind: MenuKind, menus: &mut MenuSet, host: &mut dyn Host) {
        self.pre_menu = Some(PreMenuState {
            movement_frozen: host.is_movement_frozen(),
        });
        host.set_movement_frozen(true);
        menus.activate(kind);

        self.state = CursorState::Targeting;
        self.active_menu = Some(kind);
        self.active_trigger = Some(trigger);
        self.target = None;
        self.was_menu_changed = true;
        log::debug!("Opened {} menu with {} trigger", kind, trigger);
    }

    fn close(&mut self, host: &mut dyn Host) {
        if let Some(pre) = self.pre_menu.take() {
            host.set_movement_frozen(pre.movement_frozen);
        }
        if let Some(kind) = self.active_menu.take() {
            self.was_menu_changed = true;
            log::debug!("Closed {} menu", kind);
        }
        self.state = CursorState::Idle;
        self.active_trigger = None;
        self.target = None;
    }

    /// Ignore activation input, and keep the menu from reopening, until the
    /// open trigger has been let go.
    pub fn suppress_until_trigger_release(&mut self) {
        self.activation_suppressed = true;
    }

    /// Complete a trigger-release activation once its request was handled.
    pub fn finish_release(&mut self, host: &mut dyn Host) {
        if self.state == CursorState::AwaitingRelease {
            self.close(host);
        }
    }

    /// Close after a successful activation. Suppression stays in place so a
    /// still-held trigger does not reopen the menu.
    pub fn reset_after_activation(&mut self, host: &mut dyn Host) {
        self.close(host);
    }

    /// Collapse to idle unconditionally, e.g. after a load or config reset.
    pub fn reset(&mut self, host: &mut dyn Host) {
        self.close(host);
        self.activation_suppressed = false;
        self.was_menu_changed = false;
        self.was_target_changed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StickVector;
    use crate::menu::{CustomMenu, Menu};
    use crate::testing::{FakeHost, deflect, page_of, scripted_items};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn menus_with(inventory: usize, custom: usize) -> MenuSet {
        let mut menus = MenuSet::new(12);
        menus.inventory.refresh(scripted_items(inventory));
        menus.replace_custom(CustomMenu::new(vec![page_of(custom)]));
        menus
    }

    fn left_trigger(value: f64) -> InputSnapshot {
        InputSnapshot {
            left_trigger: value,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn test_opening_freezes_and_closing_restores() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        let update = cursor.update(&left_trigger(0.9), &config, &mut menus, &mut host);
        assert!(update.opened);
        assert_eq!(cursor.state(), CursorState::Targeting);
        assert_eq!(cursor.active_menu(), Some(MenuKind::Inventory));
        assert!(cursor.was_menu_changed());
        assert!(host.frozen);

        cursor.update(&left_trigger(0.0), &config, &mut menus, &mut host);
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(!host.frozen);
        assert!(cursor.pre_menu_state().is_none());
    }

    #[test]
    fn test_closing_keeps_freeze_owned_by_someone_else() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost {
            frozen: true,
            ..FakeHost::default()
        };
        let mut cursor = Cursor::new();

        cursor.update(&left_trigger(0.9), &config, &mut menus, &mut host);
        cursor.update(&left_trigger(0.0), &config, &mut menus, &mut host);
        assert!(host.frozen);
    }

    #[test]
    fn test_right_trigger_opens_custom_menu() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        let input = InputSnapshot {
            right_trigger: 1.0,
            right_stick: StickVector::from_angle(PI, 1.0),
            ..InputSnapshot::default()
        };
        cursor.update(&input, &config, &mut menus, &mut host);
        assert_eq!(cursor.active_menu(), Some(MenuKind::Custom));
        assert_eq!(cursor.selected_index(), Some(2));
    }

    #[test]
    fn test_not_free_player_cannot_open() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost {
            free: false,
            ..FakeHost::default()
        };
        let mut cursor = Cursor::new();

        let update = cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        assert!(!update.opened);
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(host.suppressed.is_empty());
    }

    #[test]
    fn test_triggers_are_suppressed_while_idle() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&InputSnapshot::default(), &config, &mut menus, &mut host);
        assert!(host.suppressed.contains(&Button::LeftTrigger));
        assert!(host.suppressed.contains(&Button::RightTrigger));
    }

    #[test]
    fn test_deadzone_clears_target_without_closing() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&deflect(FRAC_PI_2), &config, &mut menus, &mut host);
        assert_eq!(cursor.selected_index(), Some(2));
        assert!(cursor.was_target_changed());

        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        assert_eq!(cursor.target(), None);
        assert!(cursor.was_target_changed());
        assert_eq!(cursor.state(), CursorState::Targeting);

        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        assert!(!cursor.was_target_changed());
    }

    #[test]
    fn test_target_follows_shrinking_page() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&deflect(PI), &config, &mut menus, &mut host);
        assert_eq!(cursor.selected_index(), Some(4));

        menus.inventory.refresh(scripted_items(2));
        cursor.update(&deflect(PI), &config, &mut menus, &mut host);
        assert_eq!(cursor.selected_index(), Some(1));

        menus.inventory.refresh(Vec::new());
        cursor.update(&deflect(PI), &config, &mut menus, &mut host);
        assert_eq!(cursor.target(), None);
    }

    #[test]
    fn test_action_button_requests_activation_once() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&deflect(0.0), &config, &mut menus, &mut host);
        let mut input = deflect(0.0);
        input.pressed.insert(Button::A);
        let update = cursor.update(&input, &config, &mut menus, &mut host);
        assert_eq!(
            update.activation,
            Some(ActivationRequest {
                kind: ItemActivationType::Primary,
                source: Some(Button::A),
            })
        );
        assert!(host.suppressed.contains(&Button::A));

        cursor.suppress_until_trigger_release();
        let update = cursor.update(&input, &config, &mut menus, &mut host);
        assert_eq!(update.activation, None);
    }

    #[test]
    fn test_secondary_button_requests_secondary() {
        let config = Config {
            activation_method: ActivationMethod::ThumbStickPress,
            ..Config::default()
        };
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        let mut input = deflect(0.0);
        input.pressed.insert(Button::X);
        cursor.update(&deflect(0.0), &config, &mut menus, &mut host);
        let update = cursor.update(&input, &config, &mut menus, &mut host);
        assert_eq!(
            update.activation.map(|r| r.kind),
            Some(ItemActivationType::Secondary)
        );

        let mut input = deflect(0.0);
        input.pressed.insert(Button::LeftStick);
        let update = cursor.update(&input, &config, &mut menus, &mut host);
        assert_eq!(
            update.activation.map(|r| r.kind),
            Some(ItemActivationType::Primary)
        );
    }

    #[test]
    fn test_no_activation_without_target() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        let mut input = left_trigger(1.0);
        input.pressed.insert(Button::A);
        cursor.update(&input, &config, &mut menus, &mut host);
        let update = cursor.update(&input, &config, &mut menus, &mut host);
        assert_eq!(update.activation, None);
    }

    #[test]
    fn test_trigger_release_freezes_target_then_closes() {
        let config = Config {
            activation_method: ActivationMethod::TriggerRelease,
            ..Config::default()
        };
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&deflect(PI), &config, &mut menus, &mut host);
        let released = InputSnapshot {
            left_stick: deflect(PI).left_stick,
            ..InputSnapshot::default()
        };
        let update = cursor.update(&released, &config, &mut menus, &mut host);
        assert_eq!(cursor.state(), CursorState::AwaitingRelease);
        assert_eq!(cursor.selected_index(), Some(4));
        assert_eq!(
            update.activation,
            Some(ActivationRequest {
                kind: ItemActivationType::Primary,
                source: None,
            })
        );
        assert!(host.frozen);

        cursor.finish_release(&mut host);
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(!host.frozen);
    }

    #[test]
    fn test_trigger_release_without_target_just_closes() {
        let config = Config {
            activation_method: ActivationMethod::TriggerRelease,
            ..Config::default()
        };
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        let update = cursor.update(&left_trigger(0.0), &config, &mut menus, &mut host);
        assert_eq!(update.activation, None);
        assert_eq!(cursor.state(), CursorState::Idle);
    }

    #[test]
    fn test_suppression_blocks_reopen_until_release() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        cursor.suppress_until_trigger_release();
        cursor.reset_after_activation(&mut host);

        let update = cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        assert!(!update.opened);
        assert_eq!(cursor.state(), CursorState::Idle);

        cursor.update(&left_trigger(0.0), &config, &mut menus, &mut host);
        assert!(!cursor.is_activation_suppressed());
        let update = cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        assert!(update.opened);
    }

    #[test]
    fn test_page_buttons_change_menu() {
        let config = Config::default();
        let mut menus = menus_with(20, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        let mut input = left_trigger(1.0);
        input.pressed.insert(Button::RightShoulder);
        cursor.update(&input, &config, &mut menus, &mut host);
        assert!(cursor.was_menu_changed());
        assert_eq!(menus.inventory.item_count(), 8);

        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        assert!(!cursor.was_menu_changed());
    }

    #[test]
    fn test_closing_marks_menu_changed() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        assert!(!cursor.was_menu_changed());

        cursor.update(&left_trigger(0.0), &config, &mut menus, &mut host);
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(cursor.was_menu_changed());

        cursor.update(&left_trigger(0.0), &config, &mut menus, &mut host);
        assert!(!cursor.was_menu_changed());
    }

    #[test]
    fn test_losing_control_closes_menu() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        host.free = false;
        cursor.update(&left_trigger(1.0), &config, &mut menus, &mut host);
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(!host.frozen);
    }

    #[test]
    fn test_reset_collapses_to_idle() {
        let config = Config::default();
        let mut menus = menus_with(8, 4);
        let mut host = FakeHost::default();
        let mut cursor = Cursor::new();

        cursor.update(&deflect(0.0), &config, &mut menus, &mut host);
        cursor.suppress_until_trigger_release();
        cursor.reset(&mut host);
        assert_eq!(cursor.state(), CursorState::Idle);
        assert_eq!(cursor.target(), None);
        assert!(!cursor.is_activation_suppressed());
        assert!(!host.frozen);
    }
}
