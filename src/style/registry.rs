//! Type-to-style mapping.
//!
//! # Responsibilities
//! - Map a value's concrete type to the `Format` it is logged with
//! - Hold predicate rules for families of types
//! - Publish one process-wide registry that formatters read lock-free
//!
//! # Design Decisions
//! - Exact type rules are checked first; they win over predicate rules
//! - Among predicate rules the most recently registered one wins
//! - Registering the same type twice replaces the earlier format
//! - No removal: the registry is written during setup and read afterwards

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use super::format::{active, write_debug, write_display, Format};
use super::color_escapes_enabled;
use crate::config::StyleConfig;
use crate::process::CommandLine;

/// Identity of a logged value's type, handed to predicate rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    pub id: TypeId,
    pub name: &'static str,
}

impl TypeInfo {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
}

type Predicate = dyn Fn(&TypeInfo) -> bool + Send + Sync;

/// Registered styles, keyed by type.
#[derive(Clone, Default)]
pub struct StyleRegistry {
    exact: HashMap<TypeId, Format>,
    matching: Vec<(Arc<Predicate>, Format)>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the styles for date-times, paths and command lines.
    pub fn with_styles(styles: &StyleConfig) -> Self {
        let mut registry = Self::new();
        registry.register::<chrono::DateTime<chrono::Local>>(styles.timestamp);
        registry.register::<chrono::DateTime<chrono::Utc>>(styles.timestamp);
        registry.register::<chrono::NaiveDateTime>(styles.timestamp);
        registry.register::<Path>(styles.path);
        registry.register::<PathBuf>(styles.path);
        registry.register::<CommandLine>(styles.command);
        registry
    }

    /// Style every value of type `T` with `format`.
    pub fn register<T: ?Sized + 'static>(&mut self, format: Format) {
        self.exact.insert(TypeId::of::<T>(), format);
    }

    /// Style every type accepted by `predicate` with `format`.
    pub fn register_matching<F>(&mut self, predicate: F, format: Format)
    where
        F: Fn(&TypeInfo) -> bool + Send + Sync + 'static,
    {
        self.matching.push((Arc::new(predicate), format));
    }

    pub fn lookup(&self, ty: &TypeInfo) -> Option<Format> {
        if let Some(format) = self.exact.get(&ty.id) {
            return Some(*format);
        }
        self.matching
            .iter()
            .rev()
            .find(|(predicate, _)| predicate(ty))
            .map(|(_, format)| *format)
    }

    pub fn lookup_type<T: ?Sized + 'static>(&self) -> Option<Format> {
        self.lookup(&TypeInfo::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.matching.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Debug for StyleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRegistry")
            .field("exact", &self.exact.len())
            .field("matching", &self.matching.len())
            .finish()
    }
}

static REGISTRY: LazyLock<ArcSwap<StyleRegistry>> =
    LazyLock::new(|| ArcSwap::from_pointee(StyleRegistry::with_styles(&StyleConfig::default())));

/// Register a style for `T` in the process-wide registry.
pub fn register_style<T: ?Sized + 'static>(format: Format) {
    REGISTRY.rcu(|current| {
        let mut next = StyleRegistry::clone(current);
        next.register::<T>(format);
        next
    });
}

/// Register a predicate rule in the process-wide registry.
pub fn register_style_matching<F>(predicate: F, format: Format)
where
    F: Fn(&TypeInfo) -> bool + Send + Sync + 'static,
{
    let predicate: Arc<Predicate> = Arc::new(predicate);
    REGISTRY.rcu(|current| {
        let mut next = StyleRegistry::clone(current);
        next.matching.push((predicate.clone(), format));
        next
    });
}

/// Re-register the built-in styles from configuration.
pub fn install_styles(styles: &StyleConfig) {
    let builtin = StyleRegistry::with_styles(styles);
    REGISTRY.rcu(|current| {
        let mut next = StyleRegistry::clone(current);
        next.exact.extend(builtin.exact.iter().map(|(id, format)| (*id, *format)));
        next
    });
}

/// The style registered for `T`, if any.
pub fn style_for<T: ?Sized + 'static>() -> Option<Format> {
    REGISTRY.load().lookup_type::<T>()
}

/// Borrow a value for logging with its type's registered style.
///
/// ```
/// use logweave::style::lg;
///
/// let started = chrono::Local::now();
/// tracing::info!("Started at {}", lg(&started));
/// ```
pub fn lg<T: ?Sized + 'static>(value: &T) -> Styled<'_, T> {
    Styled { value }
}

/// Borrow a path for logging with the style registered for `Path`.
///
/// Paths have no `Display` impl of their own, so they get a dedicated wrapper.
pub fn lg_path<P: AsRef<Path> + ?Sized>(path: &P) -> StyledPath<'_> {
    StyledPath {
        path: path.as_ref(),
    }
}

/// A borrowed log argument styled by type.
pub struct Styled<'a, T: ?Sized> {
    value: &'a T,
}

impl<T: ?Sized> Clone for Styled<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Styled<'_, T> {}

impl<T: ?Sized + 'static> Styled<'_, T> {
    fn format(&self) -> Option<Format> {
        if !color_escapes_enabled() {
            return None;
        }
        active(style_for::<T>())
    }
}

impl<T: ?Sized + Display + 'static> Display for Styled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_display(f, self.value, self.format())
    }
}

impl<T: ?Sized + Debug + 'static> Debug for Styled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_debug(f, self.value, self.format())
    }
}

/// A borrowed path styled like `Path`.
#[derive(Clone, Copy)]
pub struct StyledPath<'a> {
    path: &'a Path,
}

impl Display for StyledPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = if color_escapes_enabled() {
            active(style_for::<Path>())
        } else {
            None
        };
        write_display(f, &self.path.display(), format)
    }
}

impl Debug for StyledPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&lg(self.path), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{with_color_escapes, Color};

    struct JobName(&'static str);

    impl Display for JobName {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = StyleRegistry::new();
        registry.register::<u32>(Format::color(Color::Red));
        registry.register::<u32>(Format::color(Color::Blue));

        assert_eq!(registry.lookup_type::<u32>(), Some(Format::color(Color::Blue)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_exact_rule_beats_predicate() {
        let mut registry = StyleRegistry::new();
        registry.register::<u32>(Format::color(Color::Red));
        registry.register_matching(|_| true, Format::color(Color::Green));

        assert_eq!(registry.lookup_type::<u32>(), Some(Format::color(Color::Red)));
        assert_eq!(registry.lookup_type::<i64>(), Some(Format::color(Color::Green)));
    }

    #[test]
    fn test_latest_predicate_wins() {
        let mut registry = StyleRegistry::new();
        registry.register_matching(|ty| ty.name.contains("u"), Format::color(Color::Red));
        registry.register_matching(|ty| ty.name == "u8", Format::color(Color::Cyan));

        assert_eq!(registry.lookup_type::<u8>(), Some(Format::color(Color::Cyan)));
        assert_eq!(registry.lookup_type::<u16>(), Some(Format::color(Color::Red)));
        assert_eq!(registry.lookup_type::<i8>(), None);
    }

    #[test]
    fn test_builtin_styles() {
        let registry = StyleRegistry::with_styles(&StyleConfig::default());
        assert_eq!(registry.lookup_type::<Path>(), Some(Format::color(Color::Cyan)));
        assert_eq!(registry.lookup_type::<PathBuf>(), Some(Format::color(Color::Cyan)));
        assert_eq!(
            registry.lookup_type::<chrono::DateTime<chrono::Local>>(),
            Some(Format::color(Color::Yellow))
        );
        assert_eq!(registry.lookup_type::<CommandLine>(), Some(Format::default().dimmed()));
        assert_eq!(registry.lookup_type::<str>(), None);
    }

    #[test]
    fn test_unregistered_argument_renders_unchanged() {
        let rendered = with_color_escapes(true, || format!("[{:>5}] {}", lg(&42u8), lg("text")));
        assert_eq!(rendered, "[   42] text");
    }

    #[test]
    fn test_registered_argument_is_styled() {
        register_style::<JobName>(Format::color(Color::Green).bold());

        let job = JobName("numbers");
        assert_eq!(lg(&job).to_string(), "numbers");

        let rendered = with_color_escapes(true, || lg(&job).to_string());
        assert_eq!(rendered, Format::color(Color::Green).bold().paint("numbers"));
    }

    #[test]
    fn test_path_argument_is_styled() {
        let path = PathBuf::from("/etc/lib.conf");
        assert_eq!(lg_path(&path).to_string(), "/etc/lib.conf");

        let rendered = with_color_escapes(true, || format!("{}", lg_path(&path)));
        assert_eq!(rendered, Format::color(Color::Cyan).paint("/etc/lib.conf"));
    }
}
