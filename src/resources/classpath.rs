use std::{
    fs::File,
    io::{self, Cursor, Read},
    path::{Component, Path, PathBuf},
};

use tracing::trace;

use super::{ConfigLocation, ResourceLocator, ResourceNotFound};


/// Classpath path of the access-log document that ships inside the binary.
///
/// Mirrors the crate name as a package directory so it can never collide
/// with a user-provided `accesslog.toml` at the classpath root.
pub const FALLBACK_RESOURCE_PATH: &str = concat!(env!("CARGO_CRATE_NAME"), "/accesslog.toml");

/// A resource compiled into the binary.
#[derive(Clone, Copy, Debug)]
pub struct EmbeddedResource {
    pub path: &'static str,
    pub contents: &'static [u8],
}

/// Every resource this crate bundles.
pub static BUNDLED_RESOURCES: &[EmbeddedResource] = &[EmbeddedResource {
    path: FALLBACK_RESOURCE_PATH,
    contents: include_bytes!("../../resources/accesslog.toml"),
}];



/// Resolves `classpath:` locations against bundled resources first
/// and then against each root directory in order.
/// Any other location is opened straight from the filesystem.
#[derive(Clone, Debug)]
pub struct ClasspathLocator {
    embedded: &'static [EmbeddedResource],
    roots: Vec<PathBuf>,
}

impl ClasspathLocator {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self::with_embedded_resources(BUNDLED_RESOURCES, roots)
    }

    pub fn with_embedded_resources(
        embedded: &'static [EmbeddedResource],
        roots: Vec<PathBuf>,
    ) -> Self {
        Self { embedded, roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn open_classpath_resource(
        &self,
        location: &ConfigLocation,
        resource_path: &str,
    ) -> Result<Box<dyn Read>, ResourceNotFound> {
        if resource_path.is_empty() || !stays_within_root(resource_path) {
            return Err(ResourceNotFound::new(location));
        }

        if let Some(resource) = self
            .embedded
            .iter()
            .find(|resource| resource.path == resource_path)
        {
            trace!(resource_path, "Found bundled resource.");
            return Ok(Box::new(Cursor::new(resource.contents)));
        }


        let mut last_error = None;
        for root in &self.roots {
            match open_regular_file(&root.join(resource_path)) {
                Ok(file) => return Ok(Box::new(file)),
                Err(error) => last_error = Some(error),
            }
        }

        Err(match last_error {
            Some(error) => ResourceNotFound::with_source(location, error),
            None => ResourceNotFound::new(location),
        })
    }
}

impl Default for ClasspathLocator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ResourceLocator for ClasspathLocator {
    fn open(&self, location: &ConfigLocation) -> Result<Box<dyn Read>, ResourceNotFound> {
        match location {
            ConfigLocation::Classpath(resource_path) => {
                self.open_classpath_resource(location, resource_path)
            }
            ConfigLocation::File(file_path) => {
                if file_path.as_os_str().is_empty() {
                    return Err(ResourceNotFound::new(location));
                }

                let file = open_regular_file(file_path)
                    .map_err(|error| ResourceNotFound::with_source(location, error))?;

                Ok(Box::new(file))
            }
        }
    }
}


/// Classpath paths never leave the root they are looked up in.
fn stays_within_root(resource_path: &str) -> bool {
    Path::new(resource_path)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

fn open_regular_file(path: &Path) -> io::Result<File> {
    // Directories open fine on some platforms, but are never a resource.
    if path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is a directory", path.display()),
        ));
    }

    File::open(path)
}



#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn read_all(mut stream: Box<dyn Read>) -> String {
        let mut contents = String::new();
        stream.read_to_string(&mut contents).unwrap();
        contents
    }

    #[test]
    fn bundled_fallback_is_always_available() {
        let locator = ClasspathLocator::default();
        let location = ConfigLocation::Classpath(FALLBACK_RESOURCE_PATH.to_string());

        let contents = read_all(locator.open(&location).unwrap());
        assert!(contents.contains("pattern"));
    }

    #[test]
    fn searches_roots_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("accesslog.toml"), "second").unwrap();

        let locator = ClasspathLocator::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        let location = ConfigLocation::parse("classpath:accesslog.toml");
        assert_eq!(read_all(locator.open(&location).unwrap()), "second");

        fs::write(first.path().join("accesslog.toml"), "first").unwrap();
        assert_eq!(read_all(locator.open(&location).unwrap()), "first");
    }

    #[test]
    fn bundled_resources_take_precedence_over_roots() {
        let root = tempfile::tempdir().unwrap();
        let shadow = root.path().join(FALLBACK_RESOURCE_PATH);
        fs::create_dir_all(shadow.parent().unwrap()).unwrap();
        fs::write(&shadow, "shadowed").unwrap();

        let locator = ClasspathLocator::new(vec![root.path().to_path_buf()]);
        let location = ConfigLocation::Classpath(FALLBACK_RESOURCE_PATH.to_string());
        assert_ne!(read_all(locator.open(&location).unwrap()), "shadowed");
    }

    #[test]
    fn missing_resources_are_reported_as_not_found() {
        let root = tempfile::tempdir().unwrap();
        let locator = ClasspathLocator::new(vec![root.path().to_path_buf()]);

        let error = locator
            .open(&ConfigLocation::parse("classpath:missing.toml"))
            .err()
            .unwrap();
        assert_eq!(error.location, "classpath:missing.toml");
        assert!(error.source.is_some());

        assert!(locator.open(&ConfigLocation::parse("classpath:")).is_err());
        assert!(locator.open(&ConfigLocation::parse("file:")).is_err());
    }

    #[test]
    fn classpath_paths_cannot_escape_their_root() {
        let directory = tempfile::tempdir().unwrap();
        let root = directory.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(directory.path().join("outside.toml"), "escaped").unwrap();
        fs::write(root.join("inside.toml"), "inside").unwrap();

        let locator = ClasspathLocator::new(vec![root]);

        for escaping in [
            "classpath:../outside.toml",
            "classpath:nested/../../outside.toml",
            "classpath:nested/../inside.toml",
        ] {
            assert!(
                locator.open(&ConfigLocation::parse(escaping)).is_err(),
                "opened {escaping}"
            );
        }

        assert_eq!(
            read_all(locator.open(&ConfigLocation::parse("classpath:./inside.toml")).unwrap()),
            "inside"
        );
    }

    #[test]
    fn directories_are_not_resources() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("accesslog.toml")).unwrap();

        let locator = ClasspathLocator::new(vec![root.path().to_path_buf()]);
        assert!(locator
            .open(&ConfigLocation::parse("classpath:accesslog.toml"))
            .is_err());
        assert!(locator
            .open(&ConfigLocation::File(root.path().join("accesslog.toml")))
            .is_err());
    }

    #[test]
    fn opens_plain_files() {
        let directory = tempfile::tempdir().unwrap();
        let file_path = directory.path().join("custom.toml");
        fs::write(&file_path, "custom").unwrap();

        let locator = ClasspathLocator::default();
        let location = ConfigLocation::parse(&format!("file:{}", file_path.display()));
        assert_eq!(read_all(locator.open(&location).unwrap()), "custom");
    }
}
