use std::io;

use super::{Bytes, Dictionary, FilterError, FilterList};

#[derive(Clone, Debug, PartialEq)]
pub struct Stream {
    pub dictionary: Dictionary,
    /// Data as it is written to the file, after all filters were applied.
    pub data: Bytes,
}

impl Stream {
    /// Create a stream that holds `data` encoded with `filters`. The `/Filter`
    /// entry gets added to `dictionary`.
    pub fn filtered(mut dictionary: Dictionary, data: Vec<u8>, filters: &FilterList) -> io::Result<Self> {
        let data = filters.encode(data)?;
        filters.put_filter_entries(&mut dictionary);
        log::debug!("encoded stream data with {:?} into {} bytes", filters.filters(), data.len());
        Ok(Self {
            dictionary,
            data: data.into(),
        })
    }

    /// The stream data with all filters undone.
    pub fn filtered_data(&self) -> Result<Vec<u8>, FilterError> {
        FilterList::from_dictionary(&self.dictionary)?.decode(self.data.to_vec())
    }
}
