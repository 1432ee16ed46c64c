mod shared;
mod error;
mod input;
mod fishing;
mod ui;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

const SCREEN_WIDTH: f32 = 960.0;
const SCREEN_HEIGHT: f32 = 540.0;

fn main() {
    let config = fishing::FishingConfig::load_or_default(fishing::DEFAULT_CONFIG_PATH);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Angler".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<FishRegistry>()
        .init_resource::<RodRegistry>()
        .init_resource::<PlayerInput>()
        .init_resource::<InputContext>()
        .init_resource::<KeyBindings>()
        .insert_resource(config)
        // Events
        .add_event::<StartEncounterEvent>()
        .add_event::<CancelEncounterEvent>()
        .add_event::<FishingPhaseChangedEvent>()
        .add_event::<HookThrownEvent>()
        .add_event::<NibbleEvent>()
        .add_event::<EncounterEndedEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<StopSfxEvent>()
        .add_event::<SfxParameterEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(fishing::FishingPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
