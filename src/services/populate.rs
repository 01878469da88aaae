//! Demo catalog used by the `populate_rango` binary

use crate::{
    error::AppResult,
    models::{Category, Page},
    repository::Repository,
};

pub struct SeedPage {
    pub title: &'static str,
    pub url: &'static str,
    pub views: i32,
}

pub struct SeedCategory {
    pub name: &'static str,
    pub views: i32,
    pub likes: i32,
    pub pages: &'static [SeedPage],
}

pub const SEED: &[SeedCategory] = &[
    SeedCategory {
        name: "Python",
        views: 128,
        likes: 64,
        pages: &[
            SeedPage {
                title: "Official Python Tutorial",
                url: "http://docs.python.org/2/tutorial/",
                views: 20,
            },
            SeedPage {
                title: "How to Think like a Computer Scientist",
                url: "http://www.greenteapress.com/thinkpython/",
                views: 25,
            },
            SeedPage {
                title: "Learn Python in 10 Minutes",
                url: "http://www.korokithakis.net/tutorials/python/",
                views: 35,
            },
        ],
    },
    SeedCategory {
        name: "Django",
        views: 64,
        likes: 32,
        pages: &[
            SeedPage {
                title: "Official Django Tutorial",
                url: "https://docs.djangoproject.com/en/1.9/intro/tutorial01/",
                views: 36,
            },
            SeedPage {
                title: "Django Rocks",
                url: "http://www.djangorocks.com/",
                views: 23,
            },
            SeedPage {
                title: "How to Tango with Django",
                url: "http://www.tangowithdjango.com/",
                views: 45,
            },
        ],
    },
    SeedCategory {
        name: "Other Frameworks",
        views: 32,
        likes: 16,
        pages: &[
            SeedPage {
                title: "Bottle",
                url: "http://bottlepy.org/docs/dev/",
                views: 3,
            },
            SeedPage {
                title: "Flask",
                url: "http://flask.pocoo.org",
                views: 34,
            },
        ],
    },
];

/// Upsert the seed catalog; re-running resets the seeded counters
pub async fn populate(repository: &Repository) -> AppResult<Vec<(Category, Vec<Page>)>> {
    let mut added = Vec::with_capacity(SEED.len());
    for seed in SEED {
        let category = repository
            .categories_upsert(seed.name, seed.views, seed.likes)
            .await?;
        let mut pages = Vec::with_capacity(seed.pages.len());
        for page in seed.pages {
            pages.push(
                repository
                    .pages_upsert(category.id, page.title, page.url, page.views)
                    .await?,
            );
        }
        tracing::info!("Seeded category {} with {} page(s)", category.name, pages.len());
        added.push((category, pages));
    }
    Ok(added)
}
