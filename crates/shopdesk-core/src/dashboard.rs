//! Dashboard flows: product and user management.
//!
//! Every flow toasts its outcome. Failures are returned to the caller after
//! the error toast, and cached lists are only touched on success.

use shopdesk_commerce::prelude::*;

use crate::{AppResult, ShopApp};

impl ShopApp {
    /// Create `product` when it has no id, otherwise update it in place.
    pub async fn save_product(&mut self, product: Product) -> AppResult<Product> {
        let result = match product.id {
            None => self.products.create(&product).await,
            Some(id) => self.products.update(id, &product).await,
        };
        let creating = product.id.is_none();

        match result {
            Ok(saved) => {
                upsert(&mut self.catalog, saved.clone(), |p| p.id);
                self.toaster.success(
                    if creating { "Product created successfully" } else { "Product updated successfully" },
                    None,
                );
                Ok(saved)
            }
            Err(e) => Err(self.report(
                if creating { "Failed to create product" } else { "Failed to update product" },
                e,
            )),
        }
    }

    /// Delete a product and drop it from the cached catalog.
    pub async fn remove_product(&mut self, id: ProductId) -> AppResult<()> {
        let result = self.products.delete(id).await;
        match result {
            Ok(()) => {
                self.catalog.retain(|p| p.id != Some(id));
                if self.selected.as_ref().is_some_and(|p| p.id == Some(id)) {
                    self.selected = None;
                }
                self.toaster.success("Product deleted successfully", None);
                Ok(())
            }
            Err(e) => Err(self.report("Failed to delete product", e)),
        }
    }

    /// Fetch all users. On failure the previous list stays in place.
    pub async fn list_users(&mut self) -> AppResult<&[User]> {
        let result = self.users.get_all().await;
        match result {
            Ok(users) => {
                self.user_list = users;
                Ok(&self.user_list)
            }
            Err(e) => Err(self.report("Failed to load users", e)),
        }
    }

    /// Last successfully loaded user list.
    pub fn users(&self) -> &[User] {
        &self.user_list
    }

    /// Fetch a single user.
    pub async fn open_user(&mut self, id: UserId) -> AppResult<User> {
        let result = self.users.get_by_id(id).await;
        result.map_err(|e| self.report("Failed to load user", e))
    }

    /// Create `user` when it has no id, otherwise update it in place.
    pub async fn save_user(&mut self, user: User) -> AppResult<User> {
        let result = match user.id {
            None => self.users.create(&user).await,
            Some(id) => self.users.update(id, &user).await,
        };
        let creating = user.id.is_none();

        match result {
            Ok(saved) => {
                upsert(&mut self.user_list, saved.clone(), |u| u.id);
                self.toaster.success(
                    if creating { "User created successfully" } else { "User updated successfully" },
                    None,
                );
                Ok(saved)
            }
            Err(e) => Err(self.report(
                if creating { "Failed to create user" } else { "Failed to update user" },
                e,
            )),
        }
    }

    /// Delete a user and drop it from the cached list.
    pub async fn remove_user(&mut self, id: UserId) -> AppResult<()> {
        let result = self.users.delete(id).await;
        match result {
            Ok(()) => {
                self.user_list.retain(|u| u.id != Some(id));
                self.toaster.success("User deleted successfully", None);
                Ok(())
            }
            Err(e) => Err(self.report("Failed to delete user", e)),
        }
    }
}

/// Replace the entry with the same id, or append.
fn upsert<T, K: PartialEq>(list: &mut Vec<T>, value: T, key: impl Fn(&T) -> Option<K>) {
    let id = key(&value);
    match list
        .iter_mut()
        .find(|existing| id.is_some() && key(existing) == id)
    {
        Some(existing) => *existing = value,
        None => list.push(value),
    }
}
