//! The fixed DTO schemas the routes validate against.

use super::{Field, Rule, Schema};

pub static CREDENTIALS: Schema = Schema {
    fields: &[
        Field {
            name: "email",
            label: "Email",
            rules: &[Rule::Required, Rule::TypeString, Rule::Email, Rule::MaxLen(255)],
        },
        Field {
            name: "password",
            label: "Password",
            rules: &[Rule::Required, Rule::TypeString, Rule::MinLen(8), Rule::MaxLen(72)],
        },
    ],
};

pub static CREATE_STORE: Schema = Schema {
    fields: &[
        Field {
            name: "name",
            label: "Name",
            rules: &[Rule::Required, Rule::TypeString, Rule::MaxLen(100)],
        },
        Field {
            name: "description",
            label: "Description",
            rules: &[Rule::Required, Rule::TypeString, Rule::MaxLen(500)],
        },
    ],
};

pub static UPDATE_STORE: Schema = Schema {
    fields: &[
        Field {
            name: "name",
            label: "Name",
            rules: &[Rule::Required, Rule::TypeString, Rule::MaxLen(100)],
        },
        Field {
            name: "description",
            label: "Description",
            rules: &[Rule::Required, Rule::TypeString, Rule::MaxLen(500)],
        },
    ],
};

pub static CREATE_PRODUCT: Schema = Schema {
    fields: &[
        Field {
            name: "name",
            label: "Name",
            rules: &[Rule::Required, Rule::TypeString, Rule::MaxLen(100)],
        },
        Field {
            name: "description",
            label: "Description",
            rules: &[Rule::TypeString, Rule::MaxLen(500)],
        },
        Field {
            name: "price",
            label: "Price",
            rules: &[Rule::Required, Rule::TypeNumber { coerce: true }, Rule::Positive],
        },
    ],
};

pub static UPDATE_PRODUCT: Schema = Schema {
    fields: &[
        Field {
            name: "name",
            label: "Name",
            rules: &[Rule::TypeString, Rule::MaxLen(100)],
        },
        Field {
            name: "description",
            label: "Description",
            rules: &[Rule::TypeString, Rule::MaxLen(500)],
        },
        Field {
            name: "price",
            label: "Price",
            rules: &[Rule::TypeNumber { coerce: true }, Rule::Positive],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn negative_price_cites_positivity() {
        let errors = CREATE_PRODUCT
            .validate(&json!({"name": "Mug", "price": -9.99}))
            .unwrap_err();
        assert_eq!(errors.messages("price"), ["Price must be greater than 0"]);
    }

    #[test]
    fn astronomical_price_never_reaches_the_handler() {
        let errors = CREATE_PRODUCT
            .validate(&json!({"name": "Mug", "price": 1e300}))
            .unwrap_err();
        assert_eq!(errors.messages("price"), ["Price is out of range"]);
    }

    #[test]
    fn product_description_is_optional_on_create() {
        let out = CREATE_PRODUCT
            .validate(&json!({"name": "Mug", "price": 4.5}))
            .unwrap();
        assert_eq!(out, json!({"name": "Mug", "price": 4.5}));
    }

    #[test]
    fn update_product_accepts_partial_bodies() {
        let out = UPDATE_PRODUCT.validate(&json!({"price": "19.99"})).unwrap();
        assert_eq!(out, json!({"price": 19.99}));
    }

    #[test]
    fn credentials_require_well_formed_email_and_password() {
        let errors = CREDENTIALS
            .validate(&json!({"email": "not-an-email", "password": "short"}))
            .unwrap_err();
        assert_eq!(errors.messages("email"), ["Email must be a valid email"]);
        assert_eq!(
            errors.messages("password"),
            ["Password must be at least 8 characters"]
        );
    }

    #[test]
    fn store_name_and_description_are_required() {
        let errors = CREATE_STORE.validate(&json!({})).unwrap_err();
        assert_eq!(errors.messages("name"), ["Name is required"]);
        assert_eq!(errors.messages("description"), ["Description is required"]);
    }

    #[test]
    fn store_name_length_is_bounded() {
        let errors = CREATE_STORE
            .validate(&json!({"name": "x".repeat(101), "description": "d"}))
            .unwrap_err();
        assert_eq!(
            errors.messages("name"),
            ["Name must not exceed 100 characters"]
        );
    }
}
