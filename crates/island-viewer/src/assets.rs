//! Optional asset files.
//!
//! Sounds and the tree sprite are read from the `assets/` folder when they
//! exist there. Anything missing falls back to what the viewer generates
//! itself.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use island_logic::audio::{MusicTrack, SoundEffect};

/// Scale applied to `tree.png`
pub const TREE_SCALE: f32 = 4.0;

/// Folder the `AssetServer` resolves relative paths against.
///
/// Follows Bevy's file reader: `BEVY_ASSET_ROOT`, then the cargo manifest
/// directory, then the executable's directory.
pub fn asset_root() -> PathBuf {
    let base = std::env::var_os("BEVY_ASSET_ROOT")
        .or_else(|| std::env::var_os("CARGO_MANIFEST_DIR"))
        .map(PathBuf::from)
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
        })
        .unwrap_or_default();
    base.join("assets")
}

pub fn effect_file(effect: SoundEffect) -> &'static str {
    match effect {
        SoundEffect::Gunshot => "gunshot.wav",
        SoundEffect::Footstep => "footstep.wav",
        SoundEffect::Pickup => "pickup.wav",
        SoundEffect::Door => "door.wav",
        SoundEffect::Hurt => "hurt.wav",
        SoundEffect::GuardAlert => "alert.wav",
    }
}

pub fn music_stem(track: MusicTrack) -> &'static str {
    match track {
        MusicTrack::Menu => "menu_theme",
        MusicTrack::Ground => "ground_theme",
        MusicTrack::Estate => "estate_theme",
        MusicTrack::Tunnels => "tunnels_theme",
        MusicTrack::Harbor => "harbor_theme",
        MusicTrack::Combat => "combat_theme",
        MusicTrack::Victory => "victory_fanfare",
    }
}

/// First candidate that exists under `root`, as an asset path.
pub fn find_asset(root: &Path, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .find(|name| root.join(name.as_str()).is_file())
        .cloned()
}

pub fn effect_asset(root: &Path, effect: SoundEffect) -> Option<String> {
    find_asset(root, &[format!("sfx/{}", effect_file(effect))])
}

pub fn music_asset(root: &Path, track: MusicTrack) -> Option<String> {
    let stem = music_stem(track);
    find_asset(
        root,
        &[format!("music/{}.ogg", stem), format!("music/{}.wav", stem)],
    )
}

/// Sprites found on disk at startup
#[derive(Resource, Default)]
pub struct SpriteAssets {
    pub tree: Option<Handle<Image>>,
}

pub fn load_sprites(mut commands: Commands, asset_server: Res<AssetServer>) {
    let tree = find_asset(&asset_root(), &["tree.png".to_string()]).map(|path| {
        info!("Tree sprite loaded from {}", path);
        asset_server.load::<Image>(path)
    });
    commands.insert_resource(SpriteAssets { tree });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("no-such-assets")
    }

    #[test]
    fn test_missing_files_fall_back() {
        let root = missing_root();
        for effect in SoundEffect::all() {
            assert_eq!(effect_asset(&root, *effect), None);
        }
        for track in MusicTrack::all() {
            assert_eq!(music_asset(&root, *track), None);
        }
    }

    #[test]
    fn test_existing_file_found() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let found = find_asset(&root, &["missing.ogg".to_string(), "Cargo.toml".to_string()]);
        assert_eq!(found.as_deref(), Some("Cargo.toml"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(effect_file(SoundEffect::GuardAlert), "alert.wav");
        assert_eq!(effect_file(SoundEffect::Pickup), "pickup.wav");
        assert_eq!(music_stem(MusicTrack::Victory), "victory_fanfare");
        assert_eq!(music_stem(MusicTrack::Tunnels), "tunnels_theme");
    }
}
