//! RPG Maker VX Ace data records.
//!
//! Field lists follow the instance variables the editor writes. Records only declare what the
//! editor actually stores, so a file with extra fields (from a script or a newer editor) fails
//! with [`Error::UnknownFields`][crate::Error::UnknownFields] rather than losing data silently.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Table, Tone};
use crate::marshal_record;
use crate::value::Value;

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct Tileset {
        pub id: i32 => "@id",
        pub name: String => "@name",
        pub mode: i32 => "@mode",
        pub note: String => "@note",
        pub tileset_names: Vec<String> => "@tileset_names",
        /// Passage and terrain flags, one per tile id.
        pub flags: Table => "@flags",
    }
}

marshal_record! {
    /// Entry of the map tree shown in the editor.
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct MapInfo {
        pub expanded: bool => "@expanded",
        pub name: String => "@name",
        pub order: i32 => "@order",
        pub parent_id: i32 => "@parent_id",
        pub scroll_x: i32 => "@scroll_x",
        pub scroll_y: i32 => "@scroll_y",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct Map {
        pub tileset_id: i32 => "@tileset_id",
        pub parallax_name: String => "@parallax_name",
        pub parallax_show: bool => "@parallax_show",
        pub parallax_loop_x: bool => "@parallax_loop_x",
        pub parallax_loop_y: bool => "@parallax_loop_y",
        pub parallax_sx: i32 => "@parallax_sx",
        pub parallax_sy: i32 => "@parallax_sy",
        pub scroll_type: i32 => "@scroll_type",
        pub specify_battleback: bool => "@specify_battleback",
        pub width: i32 => "@width",
        pub height: i32 => "@height",
        pub autoplay_bgm: bool => "@autoplay_bgm",
        pub autoplay_bgs: bool => "@autoplay_bgs",
        pub bgm: BackgroundSound => "@bgm",
        pub bgs: BackgroundSound => "@bgs",
        pub battleback1_name: String => "@battleback1_name",
        pub battleback2_name: String => "@battleback2_name",
        pub note: String => "@note",
        pub display_name: String => "@display_name",
        pub disable_dashing: bool => "@disable_dashing",
        pub encounter_step: i32 => "@encounter_step",
        /// Tile ids, `width` x `height` x 4 layers.
        pub data: Table => "@data",
        pub events: BTreeMap<i32, MapEvent> => "@events",
        pub encounter_list: Vec<MapEncounter> => "@encounter_list",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct MapEventGraphic {
        pub character_index: i32 => "@character_index",
        pub character_name: String => "@character_name",
        pub direction: i32 => "@direction",
        pub pattern: i32 => "@pattern",
        pub tile_id: i32 => "@tile_id",
    }
}

marshal_record! {
    /// One line of an event script. What the parameters hold depends on `code`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct EventCommand {
        pub code: i32 => "@code",
        pub indent: i32 => "@indent",
        pub parameters: Vec<Value> => "@parameters",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct MoveRoute {
        pub list: Vec<MoveCommand> => "@list",
        pub repeat: bool => "@repeat",
        pub skippable: bool => "@skippable",
        pub wait: bool => "@wait",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct MoveCommand {
        pub code: i32 => "@code",
        pub parameters: Vec<Value> => "@parameters",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct MapEventPage {
        pub direction_fix: bool => "@direction_fix",
        pub move_speed: i32 => "@move_speed",
        pub move_type: i32 => "@move_type",
        pub priority_type: i32 => "@priority_type",
        pub through: bool => "@through",
        pub trigger: i32 => "@trigger",
        pub step_anime: bool => "@step_anime",
        pub walk_anime: bool => "@walk_anime",
        pub move_frequency: i32 => "@move_frequency",
        pub condition: MapPageCondition => "@condition",
        pub graphic: MapEventGraphic => "@graphic",
        pub list: Vec<EventCommand> => "@list",
        pub move_route: MoveRoute => "@move_route",
    }
}

marshal_record! {
    /// What has to hold for an event page to be active.
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct MapPageCondition {
        pub actor_id: i32 => "@actor_id",
        pub actor_valid: bool => "@actor_valid",
        pub item_id: i32 => "@item_id",
        pub item_valid: bool => "@item_valid",
        /// One of "A", "B", "C" or "D".
        pub self_switch_ch: String => "@self_switch_ch",
        pub self_switch_valid: bool => "@self_switch_valid",
        pub switch1_id: i32 => "@switch1_id",
        pub switch1_valid: bool => "@switch1_valid",
        pub switch2_id: i32 => "@switch2_id",
        pub switch2_valid: bool => "@switch2_valid",
        pub variable_id: i32 => "@variable_id",
        pub variable_valid: bool => "@variable_valid",
        pub variable_value: i32 => "@variable_value",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct MapEncounter {
        pub troop_id: i32 => "@troop_id",
        pub region_set: Value => "@region_set",
        pub weight: i32 => "@weight",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct MapEvent {
        pub id: i32 => "@id",
        pub name: String => "@name",
        pub x: i32 => "@x",
        pub y: i32 => "@y",
        pub pages: Vec<MapEventPage> => "@pages",
    }
}

marshal_record! {
    /// A music or sound effect reference, used for BGM, BGS, ME and SE alike.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
    pub struct BackgroundSound {
        pub name: String => "@name",
        pub pitch: i32 => "@pitch",
        pub volume: i32 => "@volume",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct SystemVehicle {
        pub bgm: BackgroundSound => "@bgm",
        pub character_index: i32 => "@character_index",
        pub character_name: String => "@character_name",
        pub start_map_id: i32 => "@start_map_id",
        pub start_x: i32 => "@start_x",
        pub start_y: i32 => "@start_y",
    }
}

marshal_record! {
    /// Party member used for battle tests.
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct SystemBattler {
        pub level: i32 => "@level",
        pub actor_id: i32 => "@actor_id",
        pub equips: Vec<i32> => "@equips",
    }
}

marshal_record! {
    /// Vocabulary used by the default menus and battle system.
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct SystemTerms {
        /// "Level", "LV", "HP", "HP", "MP", "MP", "TP", "TP".
        pub basic: Vec<String> => "@basic",
        /// Battle and menu commands: "Fight", "Escape", "Attack", ...
        pub commands: Vec<String> => "@commands",
        /// Equipment slots: "Weapon", "Shield", "Headgear", "Bodygear", "Accessory".
        pub etypes: Vec<String> => "@etypes",
        /// "MaxHP", "MaxMP", "ATK", "DEF", "MAT", "MDF", "AGI", "LUK".
        pub params: Vec<String> => "@params",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct System {
        /// Unused, always 0.
        pub placeholder: Value => "@_",
        pub magic_number: i32 => "@magic_number",
        pub boat: SystemVehicle => "@boat",
        pub ship: SystemVehicle => "@ship",
        pub airship: SystemVehicle => "@airship",
        /// Armor type names. The first entry is always empty.
        pub armor_types: Vec<String> => "@armor_types",
        pub battle_bgm: BackgroundSound => "@battle_bgm",
        pub battle_end_me: BackgroundSound => "@battle_end_me",
        pub battleback1_name: String => "@battleback1_name",
        pub battleback2_name: String => "@battleback2_name",
        pub battler_hue: i32 => "@battler_hue",
        pub battler_name: String => "@battler_name",
        pub currency_unit: String => "@currency_unit",
        /// Map open in the editor when the project was last saved.
        pub edit_map_id: i32 => "@edit_map_id",
        /// Element names. The first entry is always empty.
        pub elements: Vec<String> => "@elements",
        pub game_title: String => "@game_title",
        pub gameover_me: BackgroundSound => "@gameover_me",
        pub japanese: bool => "@japanese",
        pub opt_display_tp: bool => "@opt_display_tp",
        pub opt_draw_title: bool => "@opt_draw_title",
        pub opt_extra_exp: bool => "@opt_extra_exp",
        pub opt_floor_death: bool => "@opt_floor_death",
        pub opt_followers: bool => "@opt_followers",
        pub opt_slip_death: bool => "@opt_slip_death",
        pub opt_transparent: bool => "@opt_transparent",
        pub opt_use_midi: bool => "@opt_use_midi",
        /// Actor ids of the starting party.
        pub party_members: Vec<i32> => "@party_members",
        pub skill_types: Vec<String> => "@skill_types",
        pub sounds: Vec<BackgroundSound> => "@sounds",
        pub start_map_id: i32 => "@start_map_id",
        pub start_x: i32 => "@start_x",
        pub start_y: i32 => "@start_y",
        /// Switch names, indexed by switch id. The first entry is always nil.
        pub switches: Vec<String> => "@switches",
        /// Variable names, indexed by variable id. The first entry is always nil.
        pub variables: Vec<String> => "@variables",
        pub terms: SystemTerms => "@terms",
        pub test_battlers: Vec<SystemBattler> => "@test_battlers",
        pub test_troop_id: i32 => "@test_troop_id",
        pub title1_name: String => "@title1_name",
        pub title2_name: String => "@title2_name",
        pub title_bgm: BackgroundSound => "@title_bgm",
        pub version_id: i32 => "@version_id",
        /// Weapon type names. The first entry is always empty.
        pub weapon_types: Vec<String> => "@weapon_types",
        pub window_tone: Tone => "@window_tone",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct Actor {
        pub character_index: i32 => "@character_index",
        pub character_name: String => "@character_name",
        pub class_id: i32 => "@class_id",
        pub description: String => "@description",
        /// Item id per equipment slot, 0 for an empty slot.
        pub equips: Vec<i32> => "@equips",
        pub face_index: i32 => "@face_index",
        pub face_name: String => "@face_name",
        pub features: Vec<ActorFeature> => "@features",
        pub id: i32 => "@id",
        pub initial_level: i32 => "@initial_level",
        pub max_level: i32 => "@max_level",
        pub name: String => "@name",
        pub nickname: String => "@nickname",
        pub note: String => "@note",
    }
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq, Serialize)]
    pub struct ActorFeature {
        pub code: i32 => "@code",
        pub data_id: i32 => "@data_id",
        pub value: f64 => "@value",
    }
}
