use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use super::records::{Actor, Map, MapInfo, System, Tileset};
use crate::de::from_slice;
use crate::error::{Error, Result};
use crate::extension::Extensions;
use crate::unmarshal::Unmarshal;

/// Project entrypoint, relative to the project root.
pub const PROJECT_FILE: &str = "Game.rvproj2";
/// Every VX Ace project file starts with this.
pub const PROJECT_SIGNATURE: &[u8] = b"RPGVXAce 1";

/// Somewhere project files can be read from, by path relative to the project root.
pub trait DataSource {
    fn read(&self, path: &str) -> Result<Vec<u8>>;
}

/// Project files on disk.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for DirSource {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path);
        std::fs::read(&full).map_err(|err| Error::Io {
            path: full.display().to_string(),
            err,
        })
    }
}

/// Project files held in memory, keyed by relative path.
impl DataSource for HashMap<String, Vec<u8>> {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.get(path).cloned().ok_or_else(|| Error::Io {
            path: path.to_string(),
            err: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })
    }
}

fn data_path(name: &str) -> String {
    format!("Data/{}.rvdata2", name)
}

/// A loaded VX Ace project.
///
/// The databases every tool needs are read up front. Maps are large and read on demand with
/// [`load_map`][Project::load_map].
#[derive(Debug)]
pub struct Project<S: DataSource> {
    pub system: System,
    /// Actors by id. Entry 0 is always empty.
    pub actors: Vec<Actor>,
    source: S,
    extensions: Extensions,
    tilesets: Vec<Tileset>,
    map_infos: BTreeMap<i32, MapInfo>,
}

impl<S: DataSource> Project<S> {
    /// Check the project entrypoint, then read the tileset, map info, system and actor
    /// databases.
    pub fn load(source: S) -> Result<Self> {
        let entry = source.read(PROJECT_FILE)?;
        if !entry.starts_with(PROJECT_SIGNATURE) {
            return Err(Error::InvalidProject);
        }

        let extensions = Extensions::rgss();
        let tilesets = load_data(&source, &extensions, "Tilesets")?;
        let map_infos = load_data(&source, &extensions, "MapInfos")?;
        let system = load_data(&source, &extensions, "System")?;
        let actors = load_data(&source, &extensions, "Actors")?;
        Ok(Project {
            system,
            actors,
            source,
            extensions,
            tilesets,
            map_infos,
        })
    }

    /// Read any other database, e.g. `"CommonEvents"`, into whatever shape the caller wants.
    pub fn load_data<T: Unmarshal + Default>(&self, name: &str) -> Result<T> {
        load_data(&self.source, &self.extensions, name)
    }

    /// Tilesets by id. Entry 0 is always empty.
    pub fn tilesets(&self) -> &[Tileset] {
        &self.tilesets
    }

    pub fn tileset(&self, id: i32) -> Result<&Tileset> {
        if id <= 0 {
            return Err(Error::MissingTileset(id));
        }
        self.tilesets
            .get(id as usize)
            .ok_or(Error::MissingTileset(id))
    }

    /// The map tree, by map id.
    pub fn map_infos(&self) -> &BTreeMap<i32, MapInfo> {
        &self.map_infos
    }

    /// Name of the data file holding a map, e.g. `Map001`.
    pub fn map_file_name(&self, id: i32) -> Result<String> {
        if id <= 0 || !self.map_infos.contains_key(&id) {
            return Err(Error::MissingMap(id));
        }
        Ok(format!("Map{:03}", id))
    }

    pub fn load_map(&self, id: i32) -> Result<Map> {
        let name = self.map_file_name(id)?;
        self.load_data(&name)
    }
}

fn load_data<S, T>(source: &S, extensions: &Extensions, name: &str) -> Result<T>
where
    S: DataSource + ?Sized,
    T: Unmarshal + Default,
{
    let path = data_path(name);
    log::debug!("loading {}", path);
    let data = source.read(&path)?;
    from_slice(&data, extensions)
}

#[cfg(test)]
mod test {
    use super::*;

    // An empty array, valid for every list-shaped database
    const EMPTY_LIST: &[u8] = b"\x04\x08[\x00";
    const EMPTY_HASH: &[u8] = b"\x04\x08{\x00";
    const EMPTY_SYSTEM: &[u8] = b"\x04\x08o:\x10RPG::System\x00";

    fn files() -> HashMap<String, Vec<u8>> {
        let mut files = HashMap::new();
        files.insert(PROJECT_FILE.to_string(), b"RPGVXAce 1.02".to_vec());
        files.insert(data_path("Tilesets"), EMPTY_LIST.to_vec());
        files.insert(data_path("MapInfos"), EMPTY_HASH.to_vec());
        files.insert(data_path("System"), EMPTY_SYSTEM.to_vec());
        files.insert(data_path("Actors"), EMPTY_LIST.to_vec());
        files
    }

    #[test]
    fn minimal_project() {
        let project = Project::load(files()).unwrap();
        assert!(project.actors.is_empty());
        assert!(project.tilesets().is_empty());
        assert!(project.map_infos().is_empty());
        assert_eq!(project.system, System::default());
    }

    #[test]
    fn bad_signature() {
        let mut files = files();
        files.insert(PROJECT_FILE.to_string(), b"RPGVX 1".to_vec());
        assert!(matches!(Project::load(files), Err(Error::InvalidProject)));
    }

    #[test]
    fn missing_database() {
        let mut files = files();
        files.remove(&data_path("System"));
        match Project::load(files) {
            Err(Error::Io { path, err }) => {
                assert_eq!(path, "Data/System.rvdata2");
                assert_eq!(err.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn map_ids() {
        let mut files = files();
        // {1 => nil, 12 => nil}
        files.insert(data_path("MapInfos"), b"\x04\x08{\x07i\x060i\x110".to_vec());
        let project = Project::load(files).unwrap();
        assert_eq!(project.map_infos().len(), 2);
        assert_eq!(project.map_file_name(1).unwrap(), "Map001");
        assert_eq!(project.map_file_name(12).unwrap(), "Map012");
        assert!(matches!(project.map_file_name(0), Err(Error::MissingMap(0))));
        assert!(matches!(project.map_file_name(2), Err(Error::MissingMap(2))));
        // Listed, but the file is missing
        assert!(matches!(project.load_map(1), Err(Error::Io { .. })));
    }

    #[test]
    fn tileset_ids() {
        let mut files = files();
        // [nil, Tileset]
        files.insert(
            data_path("Tilesets"),
            b"\x04\x08[\x070o:\x11RPG::Tileset\x06:\x08@idi\x06".to_vec(),
        );
        let project = Project::load(files).unwrap();
        assert_eq!(project.tileset(1).unwrap().id, 1);
        assert!(matches!(project.tileset(0), Err(Error::MissingTileset(0))));
        assert!(matches!(project.tileset(2), Err(Error::MissingTileset(2))));
        assert!(matches!(project.tileset(-1), Err(Error::MissingTileset(-1))));
    }

    #[test]
    fn directory_source() {
        let source = DirSource::new("/nonexistent/project");
        let err = source.read(PROJECT_FILE).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("Game.rvproj2"));
    }
}
