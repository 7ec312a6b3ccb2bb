//! Integration tests for `DieselRecipeRepository` against embedded PostgreSQL.
//!
//! Each context starts a cluster, recreates the database, applies the
//! embedded migrations and seeds one author plus a few ingredients.

use foodgram::domain::ports::{
    IngredientRepository, NewUser, RecipeListRepository, RecipeRepository, TagRepository,
    UserRepository,
};
use foodgram::domain::{
    Amount, Email, IngredientDraft, IngredientId, PasswordHash, PersonName, RecipeDraft, RecipeId,
    RecipeList, ShoppingList, TagDraft, UserId, Username,
};
use foodgram::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselRecipeRepository, DieselUserRepository, PoolConfig,
    run_pending_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{count_rows, handle_cluster_setup_failure, reset_database};

const TEST_DB: &str = "diesel_recipe_repo_test";

struct Pantry {
    flour: IngredientId,
    sugar: IngredientId,
    eggs: IngredientId,
}

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    database_url: String,
    recipes: DieselRecipeRepository,
    catalogue: DieselCatalogueRepository,
    author: UserId,
    pantry: Pantry,
}

impl TestContext {
    fn draft(
        &self,
        title: &str,
        lines: &[(IngredientId, i64)],
        tags: Vec<TagDraft>,
    ) -> RecipeDraft {
        let lines = lines
            .iter()
            .map(|(id, amount)| (*id, Amount::new(*amount).expect("valid amount")))
            .collect();
        RecipeDraft::new(title, None, &format!("{title} method"), 20, lines, tags)
            .expect("valid draft")
    }

    fn create(&self, draft: &RecipeDraft) -> RecipeId {
        self.runtime
            .block_on(self.recipes.create(self.author, draft))
            .expect("create recipe")
    }

    /// Ingredient lines of a stored recipe as (ingredient, amount) pairs.
    fn lines_of(&self, id: RecipeId) -> Vec<(IngredientId, i16)> {
        let recipe = self
            .runtime
            .block_on(self.recipes.find_by_id(id))
            .expect("load recipe")
            .expect("recipe exists");
        recipe
            .ingredients
            .iter()
            .map(|line| (line.ingredient.id, line.amount.get()))
            .collect()
    }
}

fn seed_ingredient(
    runtime: &Runtime,
    catalogue: &DieselCatalogueRepository,
    name: &str,
    unit: &str,
) -> Result<IngredientId, String> {
    let draft = IngredientDraft::new(name, unit).map_err(|err| err.to_string())?;
    let ingredient = runtime
        .block_on(IngredientRepository::create(catalogue, &draft))
        .map_err(|err| err.to_string())?;
    Ok(ingredient.id)
}

fn seed_author(runtime: &Runtime, pool: &DbPool) -> Result<UserId, String> {
    let users = DieselUserRepository::new(pool.clone());
    let user = NewUser {
        email: Email::new("cook@example.com").map_err(|err| err.to_string())?,
        username: Username::new("cook").map_err(|err| err.to_string())?,
        first_name: PersonName::new("Julia").map_err(|err| err.to_string())?,
        last_name: PersonName::new("Child").map_err(|err| err.to_string())?,
        password_hash: PasswordHash::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
    };
    let created = runtime
        .block_on(users.create(&user))
        .map_err(|err| err.to_string())?;
    Ok(created.id)
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    reset_database(&cluster, TEST_DB)?;
    let database_url = cluster.connection().database_url(TEST_DB);
    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    let catalogue = DieselCatalogueRepository::new(pool.clone());
    let author = seed_author(&runtime, &pool)?;
    let pantry = Pantry {
        flour: seed_ingredient(&runtime, &catalogue, "flour", "g")?,
        sugar: seed_ingredient(&runtime, &catalogue, "sugar", "g")?,
        eggs: seed_ingredient(&runtime, &catalogue, "eggs", "pcs")?,
    };

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        database_url,
        recipes: DieselRecipeRepository::new(pool),
        catalogue,
        author,
        pantry,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn update_replaces_every_ingredient_line(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_replaces_every_ingredient_line skipped");
        return;
    };
    let Pantry { flour, sugar, eggs } = ctx.pantry;
    let id = ctx.create(&ctx.draft("Pancakes", &[(flour, 200), (sugar, 30)], Vec::new()));

    let replacement = ctx.draft("Pancakes", &[(sugar, 40), (eggs, 2)], Vec::new());
    ctx.runtime
        .block_on(ctx.recipes.update(id, &replacement))
        .expect("update recipe");

    assert_eq!(ctx.lines_of(id), [(sugar, 40), (eggs, 2)]);
    let stored = count_rows(
        &ctx.database_url,
        "SELECT COUNT(*) FROM recipe_ingredients WHERE recipe_id = $1",
        &[&id.get()],
    )
    .expect("count lines");
    assert_eq!(stored, 2);
}

#[rstest]
fn failed_update_keeps_the_previous_recipe(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: failed_update_keeps_the_previous_recipe skipped");
        return;
    };
    let Pantry { flour, sugar, .. } = ctx.pantry;
    let id = ctx.create(&ctx.draft("Shortbread", &[(flour, 300), (sugar, 100)], Vec::new()));

    let unknown = IngredientId::new(999_999).expect("valid id");
    let broken = ctx.draft("Renamed", &[(flour, 250), (unknown, 1)], Vec::new());
    let result = ctx.runtime.block_on(ctx.recipes.update(id, &broken));
    assert!(result.is_err(), "missing ingredient must fail the update");

    assert_eq!(ctx.lines_of(id), [(flour, 300), (sugar, 100)]);
    let recipe = ctx
        .runtime
        .block_on(ctx.recipes.find_by_id(id))
        .expect("load recipe")
        .expect("recipe exists");
    assert_eq!(recipe.title, "Shortbread");
}

#[rstest]
#[case(RecipeList::Favorites, "favorites")]
#[case(RecipeList::ShoppingCart, "shopping_cart")]
fn adding_twice_keeps_a_single_entry(
    repo_context: Option<TestContext>,
    #[case] list: RecipeList,
    #[case] table: &str,
) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: adding_twice_keeps_a_single_entry skipped");
        return;
    };
    let id = ctx.create(&ctx.draft("Meringue", &[(ctx.pantry.sugar, 150)], Vec::new()));

    let first = ctx
        .runtime
        .block_on(ctx.recipes.add(list, ctx.author, id))
        .expect("first add");
    let second = ctx
        .runtime
        .block_on(ctx.recipes.add(list, ctx.author, id))
        .expect("second add");
    assert!(first);
    assert!(!second);

    let entries = count_rows(
        &ctx.database_url,
        &format!("SELECT COUNT(*) FROM {table} WHERE user_id = $1 AND recipe_id = $2"),
        &[&ctx.author.get(), &id.get()],
    )
    .expect("count entries");
    assert_eq!(entries, 1);
}

#[rstest]
fn shopping_rows_sum_shared_ingredients(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: shopping_rows_sum_shared_ingredients skipped");
        return;
    };
    let Pantry { flour, eggs, .. } = ctx.pantry;
    let bread = ctx.create(&ctx.draft("Bread", &[(flour, 2)], Vec::new()));
    let cake = ctx.create(&ctx.draft("Cake", &[(flour, 3), (eggs, 4)], Vec::new()));
    for recipe in [bread, cake] {
        ctx.runtime
            .block_on(ctx.recipes.add(RecipeList::ShoppingCart, ctx.author, recipe))
            .expect("add to cart");
    }

    let rows = ctx
        .runtime
        .block_on(ctx.recipes.shopping_rows(ctx.author))
        .expect("shopping rows");
    assert_eq!(rows.len(), 3);

    let list = ShoppingList::aggregate(rows);
    assert_eq!(
        list.render(),
        "Foodgram\nShopping list:\neggs, 4 pcs\nflour, 5 g\n"
    );
}

#[rstest]
fn recipe_tags_are_resolved_by_slug(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: recipe_tags_are_resolved_by_slug skipped");
        return;
    };
    let breakfast = || TagDraft::new("Breakfast", "#E26C2D", "breakfast").expect("valid tag");
    let existing = ctx
        .runtime
        .block_on(TagRepository::create(&ctx.catalogue, &breakfast()))
        .expect("create tag");

    let porridge = ctx.create(&ctx.draft("Porridge", &[(ctx.pantry.sugar, 5)], vec![breakfast()]));
    let omelette = ctx.create(&ctx.draft("Omelette", &[(ctx.pantry.eggs, 3)], vec![breakfast()]));

    for id in [porridge, omelette] {
        let recipe = ctx
            .runtime
            .block_on(ctx.recipes.find_by_id(id))
            .expect("load recipe")
            .expect("recipe exists");
        let tag_ids: Vec<_> = recipe.tags.iter().map(|tag| tag.id).collect();
        assert_eq!(tag_ids, [existing.id]);
    }
    let tags = count_rows(
        &ctx.database_url,
        "SELECT COUNT(*) FROM tags WHERE slug = $1",
        &[&"breakfast"],
    )
    .expect("count tags");
    assert_eq!(tags, 1);
}

#[rstest]
fn new_tag_slugs_are_created_once(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: new_tag_slugs_are_created_once skipped");
        return;
    };
    let supper = || TagDraft::new("Supper", "#8775D2", "supper").expect("valid tag");
    let stew = ctx.create(&ctx.draft("Stew", &[(ctx.pantry.flour, 40)], vec![supper()]));
    ctx.runtime
        .block_on(ctx.recipes.update(
            stew,
            &ctx.draft("Stew", &[(ctx.pantry.flour, 45)], vec![supper()]),
        ))
        .expect("update keeps the tag");

    let tags = ctx
        .runtime
        .block_on(TagRepository::list(&ctx.catalogue))
        .expect("list tags");
    let slugs: Vec<_> = tags.iter().map(|tag| tag.slug.as_str()).collect();
    assert_eq!(slugs, ["supper"]);
}
