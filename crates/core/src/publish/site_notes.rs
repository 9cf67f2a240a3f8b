use crate::note::{Note, Vault};

/// Notes that exist only on the published site, placed in the first vault.
pub fn site_only_notes(vaults: &[Vault]) -> Vec<Note> {
    let Some(vault) = vaults.first() else {
        return Vec::new();
    };
    vec![
        Note::new("403", "403", &vault.name)
            .with_title("Access Denied")
            .with_body("You are not allowed to view this page"),
    ]
}
