use bevy::prelude::*;

use catplace::config::ConfigPath;
use catplace::CatPlaceStackPlugin;

fn main() {
    // optional first argument overrides the behaviour config path
    let config_path = std::env::args().nth(1).map(ConfigPath).unwrap_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "catplace".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(config_path)
        .add_plugins(CatPlaceStackPlugin)
        .run();
}
