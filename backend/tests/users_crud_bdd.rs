//! Behaviour tests for the user service over the in-memory store.
//!
//! These scenarios drive create, update, delete, and fetch through the
//! driving ports and check what ends up in the table.

use std::cell::RefCell;
use std::sync::Arc;

use backend::domain::ports::{UserStore, UsersCommand, UsersQuery};
use backend::domain::{User, UserService, WriteMode};
use backend::outbound::persistence::InMemoryUserStore;
use futures::executor::block_on;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct UsersWorld {
    store: RefCell<Arc<InMemoryUserStore>>,
    write_mode: RefCell<WriteMode>,
    outcome: RefCell<Option<Result<(), String>>>,
}

impl UsersWorld {
    fn new() -> Self {
        Self {
            store: RefCell::new(Arc::new(InMemoryUserStore::new())),
            write_mode: RefCell::new(WriteMode::CheckThenAct),
            outcome: RefCell::new(None),
        }
    }

    fn service(&self) -> UserService<InMemoryUserStore> {
        UserService::new(self.store.borrow().clone(), *self.write_mode.borrow())
    }

    fn record<T>(&self, result: Result<T, backend::domain::Error>) {
        let outcome = result
            .map(|_| ())
            .map_err(|err| err.message().to_owned());
        *self.outcome.borrow_mut() = Some(outcome);
    }

    fn outcome(&self) -> Result<(), String> {
        self.outcome
            .borrow()
            .clone()
            .expect("an operation should have run")
    }
}

#[fixture]
fn world() -> UsersWorld {
    UsersWorld::new()
}

#[given("an empty user table")]
fn an_empty_user_table(world: &UsersWorld) {
    *world.store.borrow_mut() = Arc::new(InMemoryUserStore::new());
}

#[given("the conditional write mode")]
fn the_conditional_write_mode(world: &UsersWorld) {
    *world.write_mode.borrow_mut() = WriteMode::Conditional;
}

#[given("a stored user with email \"{email}\" and first name \"{name}\"")]
fn a_stored_user(world: &UsersWorld, email: String, name: String) {
    let store = world.store.borrow().clone();
    block_on(store.put(&User::new(email, name, "Lovelace"))).expect("seeding should succeed");
}

#[when("a user with email \"{email}\" and first name \"{name}\" is created")]
fn a_user_is_created(world: &UsersWorld, email: String, name: String) {
    let result = block_on(world.service().create_user(User::new(email, name, "Lovelace")));
    world.record(result);
}

#[when("the user with email \"{email}\" is updated to first name \"{name}\"")]
fn the_user_is_updated(world: &UsersWorld, email: String, name: String) {
    let result = block_on(world.service().update_user(User::new(email, name, "Lovelace")));
    world.record(result);
}

#[when("the user with email \"{email}\" is deleted")]
fn the_user_is_deleted(world: &UsersWorld, email: String) {
    let result = block_on(world.service().delete_user(&email));
    world.record(result);
}

#[then("the operation succeeds")]
fn the_operation_succeeds(world: &UsersWorld) {
    assert_eq!(world.outcome(), Ok(()));
}

#[then("the operation fails with \"{message}\"")]
fn the_operation_fails_with(world: &UsersWorld, message: String) {
    assert_eq!(world.outcome(), Err(message));
}

#[then("fetching \"{email}\" returns first name \"{name}\"")]
fn fetching_returns_first_name(world: &UsersWorld, email: String, name: String) {
    let user = block_on(world.service().fetch_user(&email)).expect("fetch should succeed");
    assert_eq!(user.email(), email);
    assert_eq!(user.first_name(), name);
}

#[then("fetching \"{email}\" returns an empty record")]
fn fetching_returns_an_empty_record(world: &UsersWorld, email: String) {
    let user = block_on(world.service().fetch_user(&email)).expect("fetch should succeed");
    assert_eq!(user, User::default());
}

#[then("the table holds {count} records")]
fn the_table_holds(world: &UsersWorld, count: usize) {
    let store = world.store.borrow().clone();
    assert_eq!(block_on(store.len()), count);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Creating a new user stores it"
)]
fn creating_a_new_user(world: UsersWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Creating a duplicate user is rejected"
)]
fn creating_a_duplicate_user(world: UsersWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Creating a user with an invalid email is rejected"
)]
fn creating_with_invalid_email(world: UsersWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Updating an existing user replaces it"
)]
fn updating_an_existing_user(world: UsersWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Updating an unknown user is rejected"
)]
fn updating_an_unknown_user(world: UsersWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Deleting a missing user succeeds"
)]
fn deleting_a_missing_user(world: UsersWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Fetching a missing user yields an empty record"
)]
fn fetching_a_missing_user(world: UsersWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Conditional writes reject duplicates"
)]
fn conditional_writes_reject_duplicates(world: UsersWorld) {
    drop(world);
}
