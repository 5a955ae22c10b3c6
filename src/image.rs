//! Picking the right image URL for a printing.

use crate::models::{Card, CardVersion, FaceImages, ImageSize, Layout};

/// Image for `version` at `size`.
///
/// Single-faced layouts have no other face, so asking for it yields `None`.
/// Double-faced layouts read the image from the first or second face.
/// Unrecognised layouts yield `None`.
pub fn resolve_image(
    version: &CardVersion,
    layout: Layout,
    size: ImageSize,
    other_face: bool,
) -> Option<&str> {
    let own = move || version.image_uris.as_ref().and_then(|uris| uris.get(size));
    let face = move |index: usize| {
        version
            .card_faces
            .get(index)
            .and_then(|f| f.image_uris.as_ref())
            .and_then(|uris| uris.get(size))
    };
    match layout.face_images()? {
        FaceImages::Single if other_face => None,
        FaceImages::Single => own().or_else(|| face(0)),
        FaceImages::Double if other_face => face(1),
        FaceImages::Double => face(0).or_else(own),
    }
}

/// Image for a card, using the selected printing when given and present,
/// otherwise the default printing.
pub fn card_image<'c>(
    card: &'c Card,
    selected_version_id: Option<&str>,
    size: ImageSize,
    other_face: bool,
) -> Option<&'c str> {
    let version = selected_version_id
        .and_then(|id| card.version(id))
        .or_else(|| card.default_version())?;
    resolve_image(version, card.layout, size, other_face)
}
