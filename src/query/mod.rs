mod codec;

pub use codec::{FormUrlEncoded, QueryCodec, split_url};
