//! Shared records for integration tests

#![allow(dead_code)]

use tinyorm::model::Entity;

tinyorm::entity! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct TestModel {
        pub id: i64,
        pub first_name: String,
        pub age: i8,
        pub last_name: Option<String>,
    }
}

impl Entity for TestModel {}

tinyorm::entity! {
    #[derive(Debug, Default, PartialEq)]
    pub struct CustomTableName {
        pub name: String,
    }
}

impl Entity for CustomTableName {
    fn table_name(&self) -> String {
        "custom_table_name_t".to_string()
    }
}

tinyorm::entity! {
    #[derive(Debug, Default, PartialEq)]
    pub struct TaggedModel {
        #[orm = "column=first_name_t"]
        pub first_name: String,
        pub user_pwd: String,
    }
}

impl Entity for TaggedModel {}

pub fn tom() -> TestModel {
    TestModel {
        id: 12,
        first_name: "Tom".to_string(),
        age: 18,
        last_name: Some("Jerry".to_string()),
    }
}
