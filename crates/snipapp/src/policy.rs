use crate::model::Snippet;

/// Whether `identity` may update or delete `snippet`.
///
/// Only the owner may. An anonymous request (`None`) never may.
pub fn can_mutate(snippet: &Snippet, identity: Option<&str>) -> bool {
    identity.is_some_and(|user| snippet.owner == user)
}
