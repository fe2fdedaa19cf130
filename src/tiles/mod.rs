pub mod label;
pub mod theme;

pub use label::Label;
pub use theme::{color_band, group_color};

use smallvec::SmallVec;
use tracing::info;

use crate::config::TileConfig;
use crate::game::{GameError, Player, TOKENS};
use crate::types::{OwnershipStatus, PlayerId, TILE_WIDTH, TileId, TileType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub cost: u32,
    pub rent: SmallVec<[u32; 6]>,
    pub status: OwnershipStatus,
    pub owner: Option<PlayerId>,
}

impl Property {
    fn new(cost: u32, rent: &[u32]) -> Self {
        Self {
            cost,
            rent: SmallVec::from_slice(rent),
            status: OwnershipStatus::Unowned,
            owner: None,
        }
    }

    /// Rent for the current status. Tiers past the end of the table pay the
    /// highest listed amount.
    pub fn rent(&self) -> u32 {
        let Some(tier) = self.status.rent_tier() else {
            return 0;
        };
        self.rent
            .get(tier)
            .or(self.rent.last())
            .copied()
            .unwrap_or(0)
    }

    fn detail(&self) -> Label {
        let glyph = self.status.glyph();
        let style = self
            .owner
            .map(|owner| TOKENS[owner].style())
            .unwrap_or_default();
        let price = format!("${}", self.cost);

        let mut label = Label::styled(style, glyph);
        label.push(
            Default::default(),
            format!("{price:>width$}", width = TILE_WIDTH - glyph.len()),
        );
        label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileKind {
    Property(Property),
    /// Corners, cards and taxes. Nothing to buy, nothing to show.
    Event,
}

#[derive(Debug, Clone)]
pub struct Tile {
    id: TileId,
    name: String,
    display_name: String,
    group: String,
    tile_type: TileType,
    kind: TileKind,
    detail: Label,
    color_band: Label,
}

impl Tile {
    pub fn new(id: TileId, config: &TileConfig) -> Self {
        let kind = match (config.tile_type.is_ownable(), config.cost) {
            (true, Some(cost)) => {
                let rent = config.rent.as_deref().unwrap_or(&[]);
                TileKind::Property(Property::new(cost, rent))
            }
            _ => TileKind::Event,
        };

        let mut tile = Self {
            id,
            name: config.name.clone(),
            display_name: config.display_name.clone(),
            group: config.group.clone(),
            tile_type: config.tile_type,
            kind,
            detail: Label::blank(TILE_WIDTH),
            color_band: color_band(&config.group),
        };
        tile.update_detail();
        tile
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn kind(&self) -> &TileKind {
        &self.kind
    }

    pub fn property(&self) -> Option<&Property> {
        match &self.kind {
            TileKind::Property(property) => Some(property),
            TileKind::Event => None,
        }
    }

    pub fn is_ownable(&self) -> bool {
        self.property().is_some()
    }

    pub fn cost(&self) -> Option<u32> {
        self.property().map(|p| p.cost)
    }

    pub fn status(&self) -> OwnershipStatus {
        self.property()
            .map(|p| p.status)
            .unwrap_or(OwnershipStatus::Unowned)
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.property().and_then(|p| p.owner)
    }

    pub fn detail(&self) -> &Label {
        &self.detail
    }

    pub fn color_band(&self) -> &Label {
        &self.color_band
    }

    /// The tile number centered in the cell, shown instead of the detail
    /// while ids are toggled on.
    pub fn id_label(&self) -> Label {
        Label::plain(format!("{:^width$}", self.id, width = TILE_WIDTH))
    }

    /// Sells an unowned tile to `buyer`, returning the price paid.
    ///
    /// On success the detail label is already recomputed; the caller is
    /// responsible for getting it repainted.
    pub fn purchase(&mut self, buyer: &mut Player) -> Result<u32, GameError> {
        let tile_id = self.id;
        let TileKind::Property(property) = &mut self.kind else {
            return Err(GameError::NotOwnable { tile_id });
        };

        match property.owner {
            Some(owner) if owner == buyer.id => return Err(GameError::AlreadyOwned { tile_id }),
            Some(owner) => {
                return Err(GameError::OwnedByOther {
                    tile_id,
                    owner: TOKENS[owner].character,
                });
            }
            None => {}
        }
        if !buyer.can_afford(property.cost) {
            return Err(GameError::InsufficientFunds {
                needed: property.cost,
                available: buyer.money,
            });
        }

        let cost = property.cost;
        buyer.withdraw(cost);
        property.owner = Some(buyer.id);
        property.status = OwnershipStatus::Owned;
        self.update_detail();
        info!(tile_id, buyer = buyer.id, cost, "tile purchased");
        Ok(cost)
    }

    /// What `visitor` owes for landing here.
    pub fn rent_due(&self, visitor: PlayerId) -> u32 {
        match self.property() {
            Some(property) if property.owner.is_some_and(|owner| owner != visitor) => {
                property.rent()
            }
            _ => 0,
        }
    }

    /// Forces an ownership state. Owned states need an owner and `Unowned`
    /// must not have one.
    pub fn set_ownership(
        &mut self,
        status: OwnershipStatus,
        owner: Option<PlayerId>,
    ) -> Result<(), GameError> {
        let tile_id = self.id;
        let TileKind::Property(property) = &mut self.kind else {
            return Err(GameError::NotOwnable { tile_id });
        };
        if status.is_owned() != owner.is_some() {
            return Err(GameError::InvalidArgument(format!(
                "tile {tile_id} cannot be {status} with owner {owner:?}"
            )));
        }
        if let Some(owner) = owner {
            if owner >= TOKENS.len() {
                return Err(GameError::InvalidArgument(format!(
                    "player {owner} does not exist"
                )));
            }
        }

        property.status = status;
        property.owner = owner;
        self.update_detail();
        Ok(())
    }

    fn update_detail(&mut self) {
        self.detail = match &self.kind {
            TileKind::Property(property) => property.detail(),
            TileKind::Event => Label::blank(TILE_WIDTH),
        };
        debug_assert_eq!(self.detail.width(), TILE_WIDTH);
    }
}
