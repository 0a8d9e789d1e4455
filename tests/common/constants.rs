#![allow(dead_code)]

pub const CSV_HEADER: &str =
    "code,title,authors,year,reference,url,type,media,driveUrl,imageUrl,notes\n";

pub const RECORD_1_CODE: &str = "ECO-001";
pub const RECORD_1_TITLE: &str = "Mangrove Carbon Stocks";
pub const RECORD_1_RAW_AUTHORS: &str = "Doe, Jane; Smith, John";
pub const RECORD_1_AUTHOR: &str = "Jane Doe, John Smith";

pub const RECORD_2_CODE: &str = "ECO-002";
pub const RECORD_2_TITLE: &str = "Tidal Flat Birds";

pub const RECORD_3_CODE: &str = "ECO-003";
pub const RECORD_3_TITLE: &str = "Estuary Sediment Cores";

/// Three valid rows, in code order.
pub const VALID_CSV_ROWS: &str = "\
ECO-001,Mangrove Carbon Stocks,\"Doe, Jane; Smith, John\",2019,\"Doe, J.; Smith, J. (2019)\",https://doi.example/1,thesis,digital,https://drive.example/1,,\n\
ECO-002,Tidal Flat Birds,Prince,1987,Prince (1987),,book,print,,https://img.example/2,donated copy\n\
ECO-003,Estuary Sediment Cores,\"Lima, Ana\",0,unpublished,,dataset,digital,,,\n";
