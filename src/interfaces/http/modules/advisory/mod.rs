pub mod handlers;

pub use handlers::{
    AdvisoryHandlerState, SuggestFormDto, SuggestFormRequest, TroubleshootDto, TroubleshootRequest,
};
