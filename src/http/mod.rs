pub mod portal_headers;
