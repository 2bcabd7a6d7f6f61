//! Organisation-tree introspection: given a component, what can it reach
//! through its permission edges, and which of those are remote peers.
//!
//! Supplements the distilled spec with the original's `get_organization`
//! endpoint (an OpenAPI-exposed tree view used by UIs to render an agent's
//! subordinate tools/agents); grounded here on `Mas::get_organization`
//! walking `ComponentSpec::permitted_callees`/`extra_permitted_callees`
//! rather than a separately maintained tree structure.

use serde::Serialize;

use crate::registry::ComponentKind;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OrganizationNode {
    pub name: String,
    pub kind: ComponentKind,
    pub is_remote: bool,
    pub children: Vec<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Organization {
    pub root: OrganizationNode,
}

impl Serialize for ComponentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
