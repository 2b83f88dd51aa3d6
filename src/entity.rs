//! Entity State Module
//!
//! Trait implemented by the cached-entity-state objects a host persistence
//! layer stores in the second-level cache. The cache treats values as
//! opaque; the only thing it needs from them is the entity's runtime type,
//! so that whole entity types can be evicted at once.

/// Cached entity state, as supplied by the host persistence layer.
///
/// # Example
///
/// ```
/// use entity_cache::EntityState;
///
/// #[derive(Clone)]
/// struct PersonState {
///     name: String,
/// }
///
/// impl EntityState for PersonState {
///     fn entity_type(&self) -> &str {
///         "Person"
///     }
/// }
/// ```
pub trait EntityState: Clone {
    /// The entity's runtime type name.
    fn entity_type(&self) -> &str;

    /// Type names this entity's type inherits from, nearest first.
    ///
    /// Used to honor subtype-inclusive eviction; types without a hierarchy
    /// can keep the default.
    fn supertypes(&self) -> &[&str] {
        &[]
    }

    /// Whether this state belongs to `entity_type`, optionally counting
    /// subtypes of it.
    fn is_instance_of(&self, entity_type: &str, include_subtypes: bool) -> bool {
        if self.entity_type() == entity_type {
            return true;
        }
        include_subtypes && self.supertypes().contains(&entity_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct State {
        type_name: &'static str,
        parents: &'static [&'static str],
    }

    impl EntityState for State {
        fn entity_type(&self) -> &str {
            self.type_name
        }

        fn supertypes(&self) -> &[&str] {
            self.parents
        }
    }

    #[test]
    fn test_exact_type_match() {
        let person = State {
            type_name: "Person",
            parents: &[],
        };

        assert!(person.is_instance_of("Person", false));
        assert!(!person.is_instance_of("Address", false));
    }

    #[test]
    fn test_subtype_match_only_when_requested() {
        let student = State {
            type_name: "Student",
            parents: &["Person"],
        };

        assert!(student.is_instance_of("Student", false));
        assert!(!student.is_instance_of("Person", false));
        assert!(student.is_instance_of("Person", true));
        assert!(!student.is_instance_of("Address", true));
    }
}
