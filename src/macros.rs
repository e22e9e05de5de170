// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Declares a marker type binding a JMAP method name to its argument and
/// response types.
macro_rules! jmap_method {
    ($(#[$meta:meta])* $marker:ident, $name:expr, $arguments:ty => $response:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub enum $marker {}

        impl $crate::methods::Method for $marker {
            const NAME: &'static str = $name;
            type Arguments = $arguments;
            type Response = $response;
        }
    };
}

/// Implements `AccountScoped` for argument structs holding an
/// `account_id: Option<String>` field, directly or through a flattened
/// inner struct.
macro_rules! account_scoped {
    ($ty:ty) => {
        impl $crate::methods::AccountScoped for $ty {
            fn account_id(&self) -> Option<&str> {
                self.account_id.as_deref()
            }

            fn set_account_id(&mut self, account_id: String) {
                self.account_id = Some(account_id);
            }
        }
    };

    ($ty:ty, via $field:ident) => {
        impl $crate::methods::AccountScoped for $ty {
            fn account_id(&self) -> Option<&str> {
                $crate::methods::AccountScoped::account_id(&self.$field)
            }

            fn set_account_id(&mut self, account_id: String) {
                $crate::methods::AccountScoped::set_account_id(&mut self.$field, account_id)
            }
        }
    };
}
