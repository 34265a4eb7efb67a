//! One product editor session: form state, attribute-driven rules and the
//! submission orchestrator for both the create and the edit flow.

use std::collections::BTreeSet;

use sellerdesk_catalog::CatalogClient;
use sellerdesk_core::display::listing_route;
use sellerdesk_core::{
    completeness, Attribute, AttributeCounting, AttributeProfile, CatalogPlacement,
    CompletenessState, FlowKind, ImageFile, ImagePolicy, ProductDraft, ProductSchema,
    ValidatedProduct, VariationDraft,
};

use crate::attributes::AttributeResolver;
use crate::error::{EditorError, ModalMessage, PersistStep};
use crate::images::{AcceptReport, ImageSet};
use crate::submission::{SubmissionPhase, SubmissionTracker};
use crate::variations::VariationList;

/// Result of a completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub flow: FlowKind,
    /// Id of the saved product, when known. A create response without an
    /// id leaves this empty.
    pub product_id: Option<String>,
    pub uploaded_images: usize,
}

impl SubmitOutcome {
    /// Listing route to navigate to for a viewport of `viewport_width` px.
    #[must_use]
    pub fn redirect_route(&self, viewport_width: u32) -> &'static str {
        listing_route(viewport_width)
    }

    #[must_use]
    pub fn modal(&self) -> ModalMessage {
        match self.flow {
            FlowKind::Create => {
                ModalMessage::success("Product created", "The product was added to your catalog.")
            }
            FlowKind::Edit => {
                ModalMessage::success("Product updated", "Your changes were saved.")
            }
        }
    }
}

/// Editing state for a single product.
///
/// Top-level fields live in [`EditorSession::fields`]; variation rows are
/// managed separately by [`VariationList`] so deletes can be mirrored on the
/// server.
#[derive(Debug)]
pub struct EditorSession {
    client: CatalogClient,
    flow: FlowKind,
    product_id: Option<String>,
    placement: CatalogPlacement,
    fields: ProductDraft,
    variations: VariationList,
    /// Variation ids the server is known to hold for this product.
    server_variation_ids: BTreeSet<String>,
    images: ImageSet,
    attributes: Vec<Attribute>,
    schema: ProductSchema,
    counting: AttributeCounting,
    tracker: SubmissionTracker,
}

impl EditorSession {
    /// Opens a blank create form with one empty variation row.
    pub async fn open_create(
        client: CatalogClient,
        resolver: &mut AttributeResolver,
        placement: CatalogPlacement,
        policy: ImagePolicy,
    ) -> Self {
        let attributes = resolver.resolve(&client, &placement.category).await;
        let mut fields = ProductDraft::new_with_variation();
        let rows = std::mem::take(&mut fields.variations);
        Self::assemble(
            client,
            FlowKind::Create,
            None,
            placement,
            fields,
            VariationList::new(rows),
            ImageSet::new(policy),
            attributes,
            policy,
        )
    }

    /// Loads an existing product into an edit form.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Catalog`] when the product cannot be fetched.
    /// Attribute failures do not fail the load.
    pub async fn open_edit(
        client: CatalogClient,
        resolver: &mut AttributeResolver,
        product_id: &str,
        policy: ImagePolicy,
    ) -> Result<Self, EditorError> {
        let record = client.get_product(product_id).await?;
        let placement = record.placement();
        let images = ImageSet::from_persisted(record.image_urls(), policy);
        let id = record.id.clone();

        let mut fields = record.into_draft();
        let variations = VariationList::new(std::mem::take(&mut fields.variations));
        let attributes = resolver.resolve(&client, &placement.category).await;

        tracing::debug!(
            product_id = %id,
            variations = variations.len(),
            images = images.len(),
            "loaded product for editing"
        );

        Ok(Self::assemble(
            client,
            FlowKind::Edit,
            Some(id),
            placement,
            fields,
            variations,
            images,
            attributes,
            policy,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        client: CatalogClient,
        flow: FlowKind,
        product_id: Option<String>,
        placement: CatalogPlacement,
        fields: ProductDraft,
        variations: VariationList,
        images: ImageSet,
        attributes: Vec<Attribute>,
        policy: ImagePolicy,
    ) -> Self {
        let schema = ProductSchema::for_attributes(&attributes, policy.bounds(flow));
        let server_variation_ids = variations.persisted_ids().map(str::to_owned).collect();
        Self {
            client,
            flow,
            product_id,
            placement,
            fields,
            variations,
            server_variation_ids,
            images,
            attributes,
            schema,
            counting: AttributeCounting::default(),
            tracker: SubmissionTracker::new(),
        }
    }

    #[must_use]
    pub fn with_counting(mut self, counting: AttributeCounting) -> Self {
        self.counting = counting;
        self
    }

    #[must_use]
    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    #[must_use]
    pub fn placement(&self) -> &CatalogPlacement {
        &self.placement
    }

    #[must_use]
    pub fn fields(&self) -> &ProductDraft {
        &self.fields
    }

    /// Top-level form fields. Variation rows set here are ignored; use
    /// [`EditorSession::variation_mut`].
    pub fn fields_mut(&mut self) -> &mut ProductDraft {
        &mut self.fields
    }

    #[must_use]
    pub fn variations(&self) -> &VariationList {
        &self.variations
    }

    pub fn variation_mut(&mut self, index: usize) -> Option<&mut VariationDraft> {
        self.variations.get_mut(index)
    }

    #[must_use]
    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[must_use]
    pub fn profile(&self) -> AttributeProfile {
        self.schema.profile()
    }

    #[must_use]
    pub fn schema(&self) -> &ProductSchema {
        &self.schema
    }

    #[must_use]
    pub fn tracker(&self) -> SubmissionTracker {
        self.tracker.clone()
    }

    #[must_use]
    pub fn server_variation_ids(&self) -> &BTreeSet<String> {
        &self.server_variation_ids
    }

    /// Overlays a draft onto the form: fields present in `draft` replace
    /// the current ones. A non-empty variation list replaces the current
    /// rows.
    pub fn apply_draft(&mut self, draft: ProductDraft) {
        fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        let f = &mut self.fields;
        overlay(&mut f.name, draft.name);
        overlay(&mut f.brand, draft.brand);
        overlay(&mut f.description, draft.description);
        overlay(&mut f.sku, draft.sku);
        overlay(&mut f.ean, draft.ean);
        overlay(&mut f.height, draft.height);
        overlay(&mut f.width, draft.width);
        overlay(&mut f.length, draft.length);
        overlay(&mut f.weight, draft.weight);
        overlay(&mut f.price, draft.price);
        overlay(&mut f.price_discounted, draft.price_discounted);
        overlay(&mut f.gender, draft.gender);

        if !draft.variations.is_empty() {
            self.variations = VariationList::new(draft.variations);
        }
    }

    /// The whole form, variations included.
    #[must_use]
    pub fn form(&self) -> ProductDraft {
        ProductDraft {
            variations: self.variations.as_slice().to_vec(),
            ..self.fields.clone()
        }
    }

    #[must_use]
    pub fn completeness(&self) -> CompletenessState {
        completeness(
            &self.form(),
            self.images.len(),
            &self.attributes,
            self.counting,
        )
    }

    /// Footer progress label, e.g. `"7/13"`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        self.completeness().to_string()
    }

    /// Whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        let phase = self.tracker.phase();
        self.completeness().is_complete()
            && !phase.is_in_flight()
            && phase != SubmissionPhase::Done
    }

    pub fn add_variation(&mut self) -> usize {
        self.variations.add()
    }

    /// Deletes the variation row at `index`.
    ///
    /// Rows the server already holds are deleted there too, and the call
    /// waits for that delete. If it fails the row is still gone from the
    /// form, but its id is kept so the next submission deletes it first.
    ///
    /// # Errors
    ///
    /// [`EditorError::FirstVariationFixed`] for index 0,
    /// [`EditorError::VariationIndex`] when out of range, and
    /// [`EditorError::Persistence`] when the server delete fails.
    pub async fn delete_variation(&mut self, index: usize) -> Result<VariationDraft, EditorError> {
        if index == 0 && !self.variations.is_empty() {
            return Err(EditorError::FirstVariationFixed);
        }
        let removed = self.variations.delete(index)?;

        let server_id = removed
            .id
            .as_deref()
            .filter(|id| self.server_variation_ids.contains(*id));
        if let (Some(variation_id), Some(product_id)) = (server_id, self.product_id.as_deref()) {
            self.client
                .delete_variation(product_id, variation_id)
                .await
                .map_err(|source| EditorError::Persistence {
                    step: PersistStep::DeleteVariation {
                        variation_id: variation_id.to_string(),
                    },
                    source,
                })?;
            self.server_variation_ids.remove(variation_id);
            tracing::debug!(product_id, variation_id, "deleted variation");
        }
        Ok(removed)
    }

    pub fn accept_images(&mut self, files: Vec<ImageFile>) -> AcceptReport {
        self.images.accept_files(files)
    }

    pub fn remove_image(&mut self, url: &str) -> bool {
        self.images.remove(url)
    }

    /// Runs the completeness gate and the schema against the current form,
    /// with a blank discounted price defaulted to the full price.
    ///
    /// # Errors
    ///
    /// [`EditorError::Incomplete`] when the gate is closed, otherwise
    /// [`EditorError::Validation`] listing every failing field.
    pub fn check(&self) -> Result<ValidatedProduct, EditorError> {
        let state = self.completeness();
        if !state.is_complete() {
            return Err(EditorError::Incomplete {
                filled: state.filled,
                total: state.total,
            });
        }
        let mut form = self.form();
        form.default_discount_to_price();
        Ok(self.schema.validate(&form, self.images.len())?)
    }

    /// Validates, uploads pending images and writes the product.
    ///
    /// A failure after validation leaves the form as it was, minus whatever
    /// already reached the server (uploaded images, created or deleted
    /// variations), so submitting again resumes.
    ///
    /// # Errors
    ///
    /// [`EditorError::Busy`]/[`EditorError::Closed`] from the tracker, gate
    /// and validation errors from [`EditorError::Incomplete`] and
    /// [`EditorError::Validation`], and [`EditorError::Upload`] or
    /// [`EditorError::Persistence`] from the server phases.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, EditorError> {
        let guard = self.tracker.begin()?;

        let validated = match self.check() {
            Ok(validated) => validated,
            Err(e) => {
                guard.invalid();
                return Err(e);
            }
        };
        self.fields.default_discount_to_price();

        guard.advance(SubmissionPhase::Uploading);
        let uploaded_images = match self.upload_pending().await {
            Ok(count) => count,
            Err(e) => {
                guard.fail();
                return Err(e);
            }
        };

        guard.advance(SubmissionPhase::Persisting);
        let result = match self.flow {
            FlowKind::Create => self.persist_create(validated).await,
            FlowKind::Edit => self.persist_edit(validated).await,
        };
        if let Err(e) = result {
            tracing::warn!(flow = %self.flow, error = %e, "submission failed");
            guard.fail();
            return Err(e);
        }

        guard.done();
        tracing::info!(
            flow = %self.flow,
            product_id = self.product_id.as_deref().unwrap_or("-"),
            uploaded_images,
            "product submitted"
        );
        Ok(SubmitOutcome {
            flow: self.flow,
            product_id: self.product_id.clone(),
            uploaded_images,
        })
    }

    async fn upload_pending(&mut self) -> Result<usize, EditorError> {
        let pending = self.images.pending_files();
        if pending.is_empty() {
            return Ok(0);
        }

        let urls = self
            .client
            .upload_images(&pending)
            .await
            .map_err(EditorError::Upload)?;
        if urls.len() != pending.len() {
            return Err(EditorError::UploadMismatch {
                sent: pending.len(),
                received: urls.len(),
            });
        }
        self.images.mark_uploaded(urls);
        Ok(pending.len())
    }

    async fn persist_create(&mut self, validated: ValidatedProduct) -> Result<(), EditorError> {
        let payload = validated.into_payload(&self.placement, self.images.persisted_urls(), true);
        let id = self
            .client
            .create_product(&payload)
            .await
            .map_err(|source| EditorError::Persistence {
                step: PersistStep::CreateProduct,
                source,
            })?;
        if id.is_none() {
            tracing::debug!("create response carried no product id");
        }
        self.product_id = id;
        Ok(())
    }

    /// Deletes stale server variations, updates persisted rows, creates new
    /// rows, then patches the product. Each success is recorded before the
    /// next step runs.
    async fn persist_edit(&mut self, validated: ValidatedProduct) -> Result<(), EditorError> {
        let product_id = self
            .product_id
            .clone()
            .ok_or(EditorError::MissingProductId)?;

        let current: BTreeSet<&str> = self.variations.persisted_ids().collect();
        let stale: Vec<String> = self
            .server_variation_ids
            .iter()
            .filter(|id| !current.contains(id.as_str()))
            .cloned()
            .collect();
        for variation_id in stale {
            self.client
                .delete_variation(&product_id, &variation_id)
                .await
                .map_err(|source| EditorError::Persistence {
                    step: PersistStep::DeleteVariation {
                        variation_id: variation_id.clone(),
                    },
                    source,
                })?;
            self.server_variation_ids.remove(&variation_id);
        }

        for row in self.variations.iter().filter(|v| v.is_persisted()) {
            let variation_id = row.id.as_deref().unwrap_or_default();
            self.client
                .update_variation(&product_id, variation_id, row)
                .await
                .map_err(|source| EditorError::Persistence {
                    step: PersistStep::UpdateVariation {
                        variation_id: variation_id.to_string(),
                    },
                    source,
                })?;
        }

        for index in 0..self.variations.len() {
            let Some(row) = self.variations.get(index).filter(|v| !v.is_persisted()) else {
                continue;
            };
            let created = self
                .client
                .create_variation(&product_id, row)
                .await
                .map_err(|source| EditorError::Persistence {
                    step: PersistStep::CreateVariation { index },
                    source,
                })?;
            match created {
                Some(id) => {
                    if let Some(row) = self.variations.get_mut(index) {
                        row.id = Some(id.clone());
                    }
                    self.server_variation_ids.insert(id);
                }
                None => tracing::warn!(index, "variation created without a returned id"),
            }
        }

        let payload = validated.into_payload(&self.placement, self.images.persisted_urls(), false);
        self.client
            .update_product(&product_id, &payload)
            .await
            .map_err(|source| EditorError::Persistence {
                step: PersistStep::UpdateProduct {
                    product_id: product_id.clone(),
                },
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sellerdesk_core::Gender;

    use super::*;

    fn offline_session(attributes: Vec<Attribute>) -> EditorSession {
        let client = CatalogClient::new("http://127.0.0.1:9", 1, "test")
            .expect("client")
            .with_token("tok")
            .with_shop_id("shop");
        let mut fields = ProductDraft::new_with_variation();
        let rows = std::mem::take(&mut fields.variations);
        EditorSession::assemble(
            client,
            FlowKind::Create,
            None,
            CatalogPlacement::default(),
            fields,
            VariationList::new(rows),
            ImageSet::new(ImagePolicy::default()),
            attributes,
            ImagePolicy::default(),
        )
    }

    fn fill(session: &mut EditorSession) {
        session.apply_draft(ProductDraft {
            name: Some("Camiseta".to_string()),
            brand: Some("Marca".to_string()),
            description: Some("Algodão orgânico".to_string()),
            sku: Some("CAM-001".to_string()),
            height: Some(10.0),
            width: Some(20.0),
            length: Some(30.0),
            weight: Some(250.0),
            price: Some(Decimal::new(5990, 2)),
            ..ProductDraft::default()
        });
        let row = session.variation_mut(0).expect("first row");
        row.size = Some("M".to_string());
        row.color = Some("Red".to_string());
        row.stock = Some(5);
        session.accept_images(vec![
            ImageFile::new("a.png", vec![1]),
            ImageFile::new("b.png", vec![2]),
        ]);
    }

    #[test]
    fn filled_create_form_enables_submit() {
        let mut session = offline_session(vec![]);
        assert_eq!(session.progress_label(), "0/13");
        assert!(!session.can_submit());

        fill(&mut session);
        assert_eq!(session.progress_label(), "13/13");
        assert!(session.can_submit());
        assert_eq!(session.profile(), AttributeProfile::Color);

        let validated = session.check().expect("valid form");
        assert_eq!(validated.price_discounted, Some(Decimal::new(5990, 2)));
    }

    #[test]
    fn adding_a_row_closes_the_gate() {
        let mut session = offline_session(vec![]);
        fill(&mut session);
        session.add_variation();
        assert_eq!(session.completeness().total, 16);
        assert!(!session.can_submit());
        assert!(matches!(
            session.check(),
            Err(EditorError::Incomplete { filled: 13, total: 16 })
        ));
    }

    #[test]
    fn flavor_category_rejects_color_only_rows() {
        let mut session = offline_session(vec![Attribute::named("flavor")]);
        fill(&mut session);
        assert_eq!(session.profile(), AttributeProfile::Flavor);
        assert!(!session.can_submit());

        let row = session.variation_mut(0).expect("row");
        row.color = None;
        row.flavor = Some("Uva".to_string());
        assert!(session.can_submit());
        assert!(session.check().is_ok());
    }

    #[tokio::test]
    async fn local_rows_delete_without_server_calls() {
        let mut session = offline_session(vec![]);
        session.add_variation();
        assert!(matches!(
            session.delete_variation(0).await,
            Err(EditorError::FirstVariationFixed)
        ));
        assert!(matches!(
            session.delete_variation(5).await,
            Err(EditorError::VariationIndex { index: 5, len: 2 })
        ));
        session.delete_variation(1).await.expect("local delete");
        assert_eq!(session.variations().len(), 1);
    }

    #[test]
    fn apply_draft_keeps_fields_the_draft_omits() {
        let mut session = offline_session(vec![]);
        fill(&mut session);
        session.apply_draft(ProductDraft {
            name: Some("Camiseta Nova".to_string()),
            ..ProductDraft::default()
        });
        assert_eq!(session.fields().name.as_deref(), Some("Camiseta Nova"));
        assert_eq!(session.fields().brand.as_deref(), Some("Marca"));
        assert_eq!(session.variations().len(), 1);
    }

    #[test]
    fn apply_draft_keeps_gender_unless_given() {
        let mut session = offline_session(vec![]);
        session.fields_mut().gender = Some(Gender::Female);

        session.apply_draft(ProductDraft {
            name: Some("Camiseta".to_string()),
            ..ProductDraft::default()
        });
        assert_eq!(session.fields().gender, Some(Gender::Female));

        session.apply_draft(ProductDraft {
            gender: Some(Gender::Unisex),
            ..ProductDraft::default()
        });
        assert_eq!(session.fields().gender, Some(Gender::Unisex));
    }

    #[test]
    fn outcome_redirect_follows_viewport() {
        let outcome = SubmitOutcome {
            flow: FlowKind::Create,
            product_id: None,
            uploaded_images: 2,
        };
        assert_eq!(outcome.redirect_route(1024), "/products");
        assert_eq!(outcome.redirect_route(400), "/products-mobile");
        assert_eq!(outcome.modal().title, "Product created");
    }
}
