use uuid::Uuid;

/// Deterministic UUIDv5 from an arbitrary string id.
///
/// Re-ingesting the same sheet id always maps to the same point id, which is
/// what makes the batch upsert an overwrite rather than an append.
pub fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_same_uuid() {
        assert_eq!(stable_uuid("X123"), stable_uuid("X123"));
        assert_ne!(stable_uuid("X123"), stable_uuid("X124"));
    }
}
