//! Local profile drafts: edit, diff against the server copy, commit.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::Transport;
use crate::catalog::Catalog;
use crate::error::{ApiError, EditError};
use crate::model::ArtistProfile;
use crate::observe::Observable;

/// Editable profile fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Username,
    Name,
    Country,
    Tags,
    Bio,
    Website,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Username,
        ProfileField::Name,
        ProfileField::Country,
        ProfileField::Tags,
        ProfileField::Bio,
        ProfileField::Website,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Username => "Username",
            ProfileField::Name => "Name",
            ProfileField::Country => "Country",
            ProfileField::Tags => "Tags",
            ProfileField::Bio => "Bio",
            ProfileField::Website => "Website",
        }
    }

    /// Key used in update bodies and rejection reasons.
    pub fn wire_name(self) -> &'static str {
        match self {
            ProfileField::Username => "username",
            ProfileField::Name => "name",
            ProfileField::Country => "country",
            ProfileField::Tags => "tags",
            ProfileField::Bio => "bio",
            ProfileField::Website => "website",
        }
    }

    pub fn parse(input: &str) -> Result<Self, EditError> {
        let needle = input.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| EditError::UnknownField(needle.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Tags(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Tags(tags) => f.write_str(&tags.join(", ")),
        }
    }
}

/// Fields whose draft value differs from the original, serialized as the
/// PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileDiff(BTreeMap<ProfileField, FieldValue>);

impl ProfileDiff {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ProfileField) -> Option<&FieldValue> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: ProfileField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProfileField, &FieldValue)> {
        self.0.iter()
    }
}

/// Shadow copy of the editable subset of a profile.
///
/// `country` and `tags` hold wire values (lower-case code, slugs) so an
/// untouched draft compares equal to its source even when the source holds
/// values the catalog does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub username: String,
    pub name: String,
    pub country: String,
    pub tags: Vec<String>,
    pub bio: String,
    pub website: String,
}

impl ProfileDraft {
    pub fn from_profile(profile: &ArtistProfile) -> Self {
        Self {
            username: profile.username.clone(),
            name: profile.name.clone().unwrap_or_default(),
            country: profile.country.clone().unwrap_or_default(),
            tags: profile.tags.clone(),
            bio: profile.bio.clone().unwrap_or_default(),
            website: profile.website.clone().unwrap_or_default(),
        }
    }

    pub fn value(&self, field: ProfileField) -> FieldValue {
        match field {
            ProfileField::Username => FieldValue::Text(self.username.clone()),
            ProfileField::Name => FieldValue::Text(self.name.clone()),
            ProfileField::Country => FieldValue::Text(self.country.clone()),
            ProfileField::Tags => FieldValue::Tags(self.tags.clone()),
            ProfileField::Bio => FieldValue::Text(self.bio.clone()),
            ProfileField::Website => FieldValue::Text(self.website.clone()),
        }
    }

    fn text_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        match field {
            ProfileField::Username => Some(&mut self.username),
            ProfileField::Name => Some(&mut self.name),
            ProfileField::Bio => Some(&mut self.bio),
            ProfileField::Website => Some(&mut self.website),
            ProfileField::Country | ProfileField::Tags => None,
        }
    }

    fn copy_field(&mut self, from: &Self, field: ProfileField) {
        match field {
            ProfileField::Username => self.username.clone_from(&from.username),
            ProfileField::Name => self.name.clone_from(&from.name),
            ProfileField::Country => self.country.clone_from(&from.country),
            ProfileField::Tags => self.tags.clone_from(&from.tags),
            ProfileField::Bio => self.bio.clone_from(&from.bio),
            ProfileField::Website => self.website.clone_from(&from.website),
        }
    }

    /// Move untouched fields from `old` onto `new`, keeping the user's edits.
    fn rebase(&mut self, old: &Self, new: &Self) {
        for field in ProfileField::ALL {
            if !self.differs(old, field) {
                self.copy_field(new, field);
            }
        }
    }

    fn differs(&self, other: &Self, field: ProfileField) -> bool {
        match field {
            // tag order is not meaningful
            ProfileField::Tags => {
                let ours: BTreeSet<&String> = self.tags.iter().collect();
                let theirs: BTreeSet<&String> = other.tags.iter().collect();
                ours != theirs
            }
            _ => self.value(field) != other.value(field),
        }
    }
}

/// A server refusal attached to the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rejection {
    pub message: String,
    /// Reasons keyed by wire field name
    pub fields: BTreeMap<String, String>,
}

impl Rejection {
    fn from_error(err: &ApiError) -> Self {
        match err {
            ApiError::ValidationRejected { message, fields } => Self {
                message: message.clone(),
                fields: fields.clone(),
            },
            other => Self {
                message: other.to_string(),
                fields: BTreeMap::new(),
            },
        }
    }

    pub fn reason(&self, field: ProfileField) -> Option<&str> {
        self.fields.get(field.wire_name()).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub editing: bool,
    pub saving: bool,
    /// Draft fields while editing, otherwise the original's
    pub fields: ProfileDraft,
    pub changed: BTreeSet<ProfileField>,
    pub rejection: Option<Rejection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing differed; edit mode was left without a request
    Unchanged,
    /// The server accepted the diff and this is its representation
    Saved(ArtistProfile),
}

/// A pending update, produced by `begin_commit`.
#[derive(Debug, Clone)]
pub struct CommitRequest {
    id: String,
    diff: ProfileDiff,
    generation: u64,
}

impl CommitRequest {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn diff(&self) -> &ProfileDiff {
        &self.diff
    }
}

#[derive(Debug)]
pub struct ProfileEditor {
    original: ArtistProfile,
    draft: Option<ProfileDraft>,
    rejection: Option<Rejection>,
    saving: bool,
    // bumped whenever a draft is created or destroyed
    generation: u64,
    state: Observable<EditorSnapshot>,
}

impl ProfileEditor {
    pub fn new(original: ArtistProfile) -> Self {
        let snapshot = EditorSnapshot {
            fields: ProfileDraft::from_profile(&original),
            ..EditorSnapshot::default()
        };
        Self {
            original,
            draft: None,
            rejection: None,
            saving: false,
            generation: 0,
            state: Observable::new(snapshot),
        }
    }

    pub fn original(&self) -> &ArtistProfile {
        &self.original
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<EditorSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.state.get()
    }

    /// Fields to render: the draft while editing, otherwise the original.
    pub fn view(&self) -> ProfileDraft {
        match &self.draft {
            Some(draft) => draft.clone(),
            None => ProfileDraft::from_profile(&self.original),
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    pub fn enter_edit(&mut self) {
        if self.draft.is_some() {
            return;
        }
        self.generation += 1;
        self.draft = Some(ProfileDraft::from_profile(&self.original));
        self.rejection = None;
        self.publish();
    }

    /// Set one field from user text.
    ///
    /// Country takes an ISO code or empty to clear. Tags take a comma
    /// separated list of display tags or slugs.
    pub fn set_field(
        &mut self,
        catalog: &Catalog,
        field: ProfileField,
        value: &str,
    ) -> Result<(), EditError> {
        if self.saving {
            return Err(EditError::Saving);
        }
        let draft = self.draft.as_mut().ok_or(EditError::NotEditing)?;

        match field {
            ProfileField::Country => {
                let value = value.trim();
                draft.country = if value.is_empty() {
                    String::new()
                } else {
                    catalog
                        .country_by_code(value)
                        .map(|country| country.wire_code())
                        .ok_or_else(|| EditError::UnknownCountry(value.to_string()))?
                };
            }
            ProfileField::Tags => {
                let mut tags: Vec<String> = Vec::new();
                for input in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let slug = catalog
                        .resolve_tag(input)
                        .ok_or_else(|| EditError::UnknownTag(input.to_string()))?;
                    if !tags.iter().any(|tag| tag == slug.as_str()) {
                        tags.push(slug.into_string());
                    }
                }
                draft.tags = tags;
            }
            text_field => {
                if let Some(slot) = draft.text_mut(text_field) {
                    *slot = value.to_string();
                }
            }
        }

        self.clear_reason(field);
        self.publish();
        Ok(())
    }

    /// Add or remove a tag given by display name or slug.
    pub fn toggle_tag(&mut self, catalog: &Catalog, tag: &str) -> Result<(), EditError> {
        if self.saving {
            return Err(EditError::Saving);
        }
        let draft = self.draft.as_mut().ok_or(EditError::NotEditing)?;
        let slug = catalog
            .resolve_tag(tag)
            .ok_or_else(|| EditError::UnknownTag(tag.to_string()))?;

        if let Some(pos) = draft.tags.iter().position(|t| t == slug.as_str()) {
            draft.tags.remove(pos);
        } else {
            draft.tags.push(slug.into_string());
        }

        self.clear_reason(ProfileField::Tags);
        self.publish();
        Ok(())
    }

    /// Fields that differ from the original. Empty when not editing.
    pub fn diff(&self) -> ProfileDiff {
        let Some(draft) = &self.draft else {
            return ProfileDiff::default();
        };
        let base = ProfileDraft::from_profile(&self.original);
        ProfileDiff(
            ProfileField::ALL
                .into_iter()
                .filter(|field| draft.differs(&base, *field))
                .map(|field| (field, draft.value(field)))
                .collect(),
        )
    }

    pub fn discard(&mut self) {
        if self.draft.take().is_some() {
            self.generation += 1;
            debug!(id = %self.original.id, "draft discarded");
        }
        self.rejection = None;
        self.saving = false;
        self.publish();
    }

    /// Prepare an update. `Ok(None)` means nothing changed and edit mode
    /// has been left.
    pub fn begin_commit(&mut self) -> Result<Option<CommitRequest>, EditError> {
        if self.draft.is_none() {
            return Err(EditError::NotEditing);
        }
        if self.saving {
            return Err(EditError::Saving);
        }
        let diff = self.diff();
        if diff.is_empty() {
            self.discard();
            return Ok(None);
        }
        self.saving = true;
        self.publish();
        Ok(Some(CommitRequest {
            id: self.original.id.clone(),
            diff,
            generation: self.generation,
        }))
    }

    /// Apply the server's answer to a request from `begin_commit`.
    ///
    /// An accepted update always becomes the new original. The draft is only
    /// destroyed, or marked rejected, when it is the one that was sent. A
    /// newer draft is rebased so its untouched fields follow the server.
    pub fn finish_commit(
        &mut self,
        request: CommitRequest,
        result: Result<ArtistProfile, ApiError>,
    ) -> Result<CommitOutcome, EditError> {
        let current = request.generation == self.generation && request.id == self.original.id;

        match result {
            Ok(profile) => {
                info!(id = %profile.id, fields = request.diff.len(), "profile saved");
                let old = ProfileDraft::from_profile(&self.original);
                self.original = profile.clone();
                if current {
                    self.draft = None;
                    self.generation += 1;
                    self.rejection = None;
                    self.saving = false;
                } else if let Some(draft) = &mut self.draft {
                    draft.rebase(&old, &ProfileDraft::from_profile(&profile));
                }
                self.publish();
                Ok(CommitOutcome::Saved(profile))
            }
            Err(err) => {
                warn!(id = %request.id, error = %err, "profile update failed");
                if current {
                    self.rejection = Some(Rejection::from_error(&err));
                    self.saving = false;
                    self.publish();
                }
                Err(EditError::Api(err))
            }
        }
    }

    /// Commit the draft through `transport`.
    pub async fn commit<T: Transport>(&mut self, transport: &T) -> Result<CommitOutcome, EditError> {
        let Some(request) = self.begin_commit()? else {
            return Ok(CommitOutcome::Unchanged);
        };
        let result = transport.update_profile(request.id(), request.diff()).await;
        self.finish_commit(request, result)
    }

    fn clear_reason(&mut self, field: ProfileField) {
        if let Some(rejection) = &mut self.rejection {
            rejection.fields.remove(field.wire_name());
        }
    }

    fn publish(&self) {
        let diff = self.diff();
        self.state.publish(EditorSnapshot {
            editing: self.draft.is_some(),
            saving: self.saving,
            fields: self.view(),
            changed: diff.iter().map(|(field, _)| *field).collect(),
            rejection: self.rejection.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::model::fixtures;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn editing(profile: ArtistProfile) -> ProfileEditor {
        let mut editor = ProfileEditor::new(profile);
        editor.enter_edit();
        editor
    }

    #[test]
    fn test_enter_then_discard_leaves_profile_unchanged() {
        let profile = fixtures::profile("1", "beatsmith");
        let mut editor = ProfileEditor::new(profile.clone());
        editor.enter_edit();
        editor.set_field(&catalog(), ProfileField::Name, "Someone Else").unwrap();
        editor.discard();

        assert_eq!(editor.original(), &profile);
        assert!(!editor.is_editing());
        assert_eq!(editor.view(), ProfileDraft::from_profile(&profile));
        assert!(editor.diff().is_empty());
    }

    #[test]
    fn test_untouched_draft_has_empty_diff() {
        let mut profile = fixtures::profile("1", "beatsmith");
        profile.country = Some("zz".to_string());
        profile.tags.push("retired".to_string());
        let editor = editing(profile);
        assert!(editor.diff().is_empty());
    }

    #[test]
    fn test_diff_contains_exactly_changed_fields() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        editor.set_field(&catalog, ProfileField::Name, "New Name").unwrap();
        editor.set_field(&catalog, ProfileField::Bio, "Producer. Collabs with @friend").unwrap();

        let diff = editor.diff();
        assert_eq!(diff.len(), 1);
        assert_eq!(
            diff.get(ProfileField::Name),
            Some(&FieldValue::Text("New Name".to_string()))
        );
        assert!(!diff.contains(ProfileField::Bio));
    }

    #[test]
    fn test_diff_serializes_camel_case_object() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        editor.set_field(&catalog, ProfileField::Tags, "Hip Hop, Rock").unwrap();
        editor.set_field(&catalog, ProfileField::Name, "X").unwrap();

        let json = serde_json::to_string(&editor.diff()).unwrap();
        assert_eq!(json, r#"{"name":"X","tags":["hiphop","rock"]}"#);
    }

    #[test]
    fn test_country_must_be_known() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        assert_eq!(
            editor.set_field(&catalog, ProfileField::Country, "XX"),
            Err(EditError::UnknownCountry("XX".to_string()))
        );

        editor.set_field(&catalog, ProfileField::Country, "GB").unwrap();
        assert_eq!(
            editor.diff().get(ProfileField::Country),
            Some(&FieldValue::Text("gb".to_string()))
        );

        editor.set_field(&catalog, ProfileField::Country, "US").unwrap();
        assert!(editor.diff().is_empty());

        editor.set_field(&catalog, ProfileField::Country, "").unwrap();
        assert_eq!(
            editor.diff().get(ProfileField::Country),
            Some(&FieldValue::Text(String::new()))
        );
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        assert_eq!(
            editor.set_field(&catalog(), ProfileField::Tags, "Pop, Polka"),
            Err(EditError::UnknownTag("Polka".to_string()))
        );
        assert!(editor.diff().is_empty());
    }

    #[test]
    fn test_toggle_tag_twice_restores_membership() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        editor.toggle_tag(&catalog, "Jazz").unwrap();
        assert!(editor.view().tags.contains(&"jazz".to_string()));
        editor.toggle_tag(&catalog, "Jazz").unwrap();
        assert!(!editor.view().tags.contains(&"jazz".to_string()));
        assert!(editor.diff().is_empty());

        editor.toggle_tag(&catalog, "hiphop").unwrap();
        editor.toggle_tag(&catalog, "Hip Hop").unwrap();
        assert!(editor.diff().is_empty());
    }

    #[test]
    fn test_edits_require_edit_mode() {
        let mut editor = ProfileEditor::new(fixtures::profile("1", "beatsmith"));
        assert_eq!(
            editor.set_field(&catalog(), ProfileField::Name, "x"),
            Err(EditError::NotEditing)
        );
        assert_eq!(editor.toggle_tag(&catalog(), "Pop"), Err(EditError::NotEditing));
        assert!(matches!(editor.begin_commit(), Err(EditError::NotEditing)));
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(ProfileField::parse("Website"), Ok(ProfileField::Website));
        assert_eq!(ProfileField::parse(" bio "), Ok(ProfileField::Bio));
        assert_eq!(
            ProfileField::parse("followers"),
            Err(EditError::UnknownField("followers".to_string()))
        );
    }

    #[test]
    fn test_snapshot_tracks_draft() {
        let mut editor = ProfileEditor::new(fixtures::profile("1", "beatsmith"));
        let mut rx = editor.subscribe();
        editor.enter_edit();
        editor.set_field(&catalog(), ProfileField::Website, "https://beats.example").unwrap();

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert!(snapshot.editing);
        assert_eq!(snapshot.fields.website, "https://beats.example");
        assert!(snapshot.changed.contains(&ProfileField::Website));
    }

    #[tokio::test]
    async fn test_commit_unchanged_skips_request() {
        let transport = FakeTransport::new();
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        assert_eq!(editor.commit(&transport).await, Ok(CommitOutcome::Unchanged));
        assert!(!editor.is_editing());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_commit_success_rebases() {
        let mut saved = fixtures::profile("1", "beatsmith");
        saved.name = Some("Server Name".to_string());
        let transport = FakeTransport::new().with_update(Ok(saved.clone()));

        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        editor.set_field(&catalog(), ProfileField::Name, "Server Name").unwrap();

        assert_eq!(
            editor.commit(&transport).await,
            Ok(CommitOutcome::Saved(saved.clone()))
        );
        assert!(!editor.is_editing());
        assert_eq!(editor.original(), &saved);
        assert_eq!(transport.calls(), vec!["update:db-1"]);
        let sent = transport.sent_diffs();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains(ProfileField::Name));
    }

    #[tokio::test]
    async fn test_commit_rejection_keeps_draft() {
        let mut fields = BTreeMap::new();
        fields.insert("website".to_string(), "must be a URL".to_string());
        let transport = FakeTransport::new().with_update(Err(ApiError::ValidationRejected {
            message: "invalid".to_string(),
            fields,
        }));

        let original = fixtures::profile("1", "beatsmith");
        let mut editor = editing(original.clone());
        let catalog = catalog();
        editor.set_field(&catalog, ProfileField::Website, "nope").unwrap();

        let result = editor.commit(&transport).await;
        assert!(matches!(result, Err(EditError::Api(ApiError::ValidationRejected { .. }))));
        assert!(editor.is_editing());
        assert_eq!(editor.view().website, "nope");
        assert_eq!(editor.original(), &original);

        let rejection = editor.rejection().unwrap();
        assert_eq!(rejection.message, "invalid");
        assert_eq!(rejection.reason(ProfileField::Website), Some("must be a URL"));

        editor.set_field(&catalog, ProfileField::Website, "https://ok.example").unwrap();
        assert_eq!(editor.rejection().unwrap().reason(ProfileField::Website), None);
    }

    #[test]
    fn test_stale_commit_keeps_new_draft() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        editor.set_field(&catalog, ProfileField::Name, "First").unwrap();
        let request = editor.begin_commit().unwrap().unwrap();

        editor.discard();
        editor.enter_edit();
        editor.set_field(&catalog, ProfileField::Bio, "second draft").unwrap();

        let mut saved = fixtures::profile("1", "beatsmith");
        saved.name = Some("First".to_string());
        editor.finish_commit(request, Ok(saved)).unwrap();

        assert!(editor.is_editing());
        assert_eq!(editor.view().bio, "second draft");
        assert_eq!(editor.original().name.as_deref(), Some("First"));
    }

    #[test]
    fn test_stale_save_rebases_untouched_fields() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        editor.set_field(&catalog, ProfileField::Name, "First").unwrap();
        let request = editor.begin_commit().unwrap().unwrap();

        editor.discard();
        editor.enter_edit();
        editor.set_field(&catalog, ProfileField::Bio, "second draft").unwrap();

        let mut saved = fixtures::profile("1", "beatsmith");
        saved.name = Some("First".to_string());
        editor.finish_commit(request, Ok(saved)).unwrap();

        let diff = editor.diff();
        assert_eq!(diff.len(), 1);
        assert!(diff.contains(ProfileField::Bio));
        assert_eq!(editor.view().name, "First");
        assert!(editor.snapshot().changed.iter().all(|f| *f == ProfileField::Bio));
    }

    #[test]
    fn test_stale_save_keeps_conflicting_edit() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        editor.set_field(&catalog, ProfileField::Name, "First").unwrap();
        let request = editor.begin_commit().unwrap().unwrap();

        editor.discard();
        editor.enter_edit();
        editor.set_field(&catalog, ProfileField::Name, "Second").unwrap();

        let mut saved = fixtures::profile("1", "beatsmith");
        saved.name = Some("First".to_string());
        editor.finish_commit(request, Ok(saved)).unwrap();

        assert_eq!(editor.view().name, "Second");
        assert_eq!(
            editor.diff().get(ProfileField::Name),
            Some(&FieldValue::Text("Second".to_string()))
        );
    }

    #[test]
    fn test_edits_are_refused_while_saving() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        editor.set_field(&catalog, ProfileField::Name, "First").unwrap();
        let request = editor.begin_commit().unwrap().unwrap();
        assert!(editor.is_saving());

        assert_eq!(
            editor.set_field(&catalog, ProfileField::Bio, "typed during save"),
            Err(EditError::Saving)
        );
        assert_eq!(editor.toggle_tag(&catalog, "Rock"), Err(EditError::Saving));
        assert!(matches!(editor.begin_commit(), Err(EditError::Saving)));
        assert_eq!(editor.view().bio, "Producer. Collabs with @friend");

        let mut saved = fixtures::profile("1", "beatsmith");
        saved.name = Some("First".to_string());
        editor.finish_commit(request, Ok(saved)).unwrap();
        assert!(!editor.is_saving());
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_rejected_save_allows_editing_again() {
        let mut editor = editing(fixtures::profile("1", "beatsmith"));
        let catalog = catalog();
        editor.set_field(&catalog, ProfileField::Website, "nope").unwrap();
        let request = editor.begin_commit().unwrap().unwrap();

        let err = ApiError::ValidationRejected {
            message: "invalid".to_string(),
            fields: BTreeMap::new(),
        };
        assert!(editor.finish_commit(request, Err(err)).is_err());
        assert!(!editor.is_saving());
        editor.set_field(&catalog, ProfileField::Website, "https://ok.example").unwrap();
        assert!(editor.begin_commit().unwrap().is_some());
    }
}
