pub mod booking;
pub mod profile;
pub mod search;
pub mod upload;
pub mod venue;

pub use booking::{Booking, BookingReceipt, BookingStatus, NewBooking};
pub use profile::{AuthPayload, GoogleLoginRequest, LoginRequest, Profile, ProfileEnvelope, SignupRequest};
pub use search::SearchFilter;
pub use upload::{UploadMode, UploadSignature, UploadSignatureRequest};
pub use venue::{Amenities, Availability, PriceOverride, Venue, VenueDraft, VenuePatch, VenueType};
