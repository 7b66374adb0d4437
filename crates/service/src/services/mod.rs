//! One service per API resource. Every function is the shared call contract
//! with a fixed endpoint, method and field mapping.

pub mod bank;
pub mod banners;
pub mod chat;
pub mod earnings;
pub mod menu;
pub mod nightlife;
pub mod orders;
pub mod profile;
pub mod promotions;
pub mod qr;
pub mod reservations;
pub mod reviews;
pub mod withdrawals;

use std::sync::Arc;

use models::FileUpload;
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthService;
use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::http::MultipartForm;
use crate::identity::VenueIdentityCache;

pub use bank::BankService;
pub use banners::BannerService;
pub use chat::ChatService;
pub use earnings::EarningsService;
pub use menu::MenuService;
pub use nightlife::NightlifeService;
pub use orders::OrderService;
pub use profile::ProfileService;
pub use promotions::PromotionService;
pub use qr::QrService;
pub use reservations::ReservationService;
pub use reviews::ReviewService;
pub use withdrawals::WithdrawalService;

/// Every resource service over one client and one venue cache.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub orders: OrderService,
    pub reservations: ReservationService,
    pub banners: BannerService,
    pub promotions: PromotionService,
    pub menu: MenuService,
    pub profile: ProfileService,
    pub bank: BankService,
    pub withdrawals: WithdrawalService,
    pub earnings: EarningsService,
    pub reviews: ReviewService,
    pub qr: QrService,
    pub chat: ChatService,
    pub nightlife: NightlifeService,
    venue: Arc<VenueIdentityCache>,
}

impl Services {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let venue = Arc::new(VenueIdentityCache::new());
        Self {
            auth: AuthService::new(client.clone(), venue.clone()),
            orders: OrderService::new(client.clone()),
            reservations: ReservationService::new(client.clone()),
            banners: BannerService::new(client.clone(), venue.clone()),
            promotions: PromotionService::new(client.clone()),
            menu: MenuService::new(client.clone()),
            profile: ProfileService::new(client.clone()),
            bank: BankService::new(client.clone()),
            withdrawals: WithdrawalService::new(client.clone()),
            earnings: EarningsService::new(client.clone()),
            reviews: ReviewService::new(client.clone()),
            qr: QrService::new(client.clone(), venue.clone()),
            chat: ChatService::new(client.clone()),
            nightlife: NightlifeService::new(client),
            venue,
        }
    }

    pub fn venue_cache(&self) -> &Arc<VenueIdentityCache> { &self.venue }
}

pub(crate) fn to_body<T: Serialize>(payload: &T) -> Result<Value, ClientError> {
    serde_json::to_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
}

pub(crate) fn ensure_image(file: &FileUpload) -> Result<(), ClientError> {
    if file.bytes.is_empty() {
        return Err(ClientError::Validation(format!("{} is empty", file.file_name)));
    }
    if !file.is_image() {
        return Err(ClientError::Validation(format!("{} is not an image", file.file_name)));
    }
    Ok(())
}

/// Form fields as text parts plus an optional image under `file_field`.
pub(crate) fn form_with_image<T: Serialize>(
    form: &T,
    file_field: &str,
    image: Option<FileUpload>,
) -> Result<MultipartForm, ClientError> {
    let parts = MultipartForm::from_serializable(form)?;
    match image {
        Some(file) => {
            ensure_image(&file)?;
            Ok(parts.file(file_field, file))
        }
        None => Ok(parts),
    }
}
