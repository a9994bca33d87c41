mod airtable_adapter;

pub use airtable_adapter::AirtableAdapter;
