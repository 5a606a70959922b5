use crate::collider::Collider;

/// Narrows which colliders a query may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter<'a> {
    #[default]
    Always,
    /// Only colliders whose collision group equals the name.
    Group(&'a str),
    /// Only copies of the named template.
    Template(&'a str),
}

impl<'a> Filter<'a> {
    /// An absent or empty group means no filtering at all.
    pub fn group(cgroup: Option<&'a str>) -> Self {
        match cgroup {
            Some(name) if !name.is_empty() => Filter::Group(name),
            _ => Filter::Always,
        }
    }

    pub fn accepts(&self, collider: &Collider) -> bool {
        match self {
            Filter::Always => true,
            Filter::Group(name) => collider.cgroup() == Some(*name),
            Filter::Template(name) => collider.template() == Some(*name),
        }
    }
}
